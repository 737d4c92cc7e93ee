use crate::message::RecoveryPolicy;
use crate::message_source::MessageSource;
use crate::{Arguments, ChannelFlags, DecodeArguments, EncodeArguments};
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

const ENCODE_COMMAND: &str = "encode";
const DECODE_COMMAND: &str = "decode";

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = command.subcommand(Self::create_encode_command());
        let command = command.subcommand(Self::create_decode_command());
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
            .subcommand_required(true)
            .arg_required_else_help(true)
    }

    fn create_encode_command() -> Command {
        let command = Command::new(ENCODE_COMMAND).about("Hide text in an image");
        let command = command.arg(Self::create_input_file_argument(
            "Path to the cover image (png, bmp, tiff, jpg)",
        ));
        let command = command.arg(Self::create_output_file_argument(
            "Path to the lossless output image (png, bmp, tiff)",
        ));
        let command = Self::register_lsb_count_argument(command);
        let command = Self::register_gray_argument(command);
        let command = Self::register_channel_arguments(command);
        let command = Self::register_message_argument(command);
        Self::register_from_file_argument(command)
    }

    fn create_decode_command() -> Command {
        let command = Command::new(DECODE_COMMAND).about("Read hidden text from an image");
        let command = command.arg(Self::create_input_file_argument(
            "Path to the image holding the text (png, bmp, tiff)",
        ));
        let command = command.arg(Self::create_output_file_argument(
            "Path to the text output file (txt, msg, doc)",
        ));
        let command = Self::register_lsb_count_argument(command);
        let command = Self::register_gray_argument(command);
        let command = Self::register_channel_arguments(command);
        let command = Self::register_length_argument(command);
        Self::register_recovery_argument(command)
    }

    fn register_lsb_count_argument(command: Command) -> Command {
        command.arg(Self::create_lsb_count_argument())
    }

    fn register_gray_argument(command: Command) -> Command {
        command.arg(arg!(gray: -g --gray "Convert the image to grayscale before use"))
    }

    fn register_channel_arguments(command: Command) -> Command {
        command
            .arg(arg!(--no_red "Leave the red channel untouched"))
            .arg(arg!(--no_green "Leave the green channel untouched"))
            .arg(arg!(--no_blue "Leave the blue channel untouched"))
    }

    fn register_message_argument(command: Command) -> Command {
        command.arg(Self::create_message_argument())
    }

    fn register_from_file_argument(command: Command) -> Command {
        command.arg(Self::create_from_file_argument())
    }

    fn register_length_argument(command: Command) -> Command {
        command.arg(Self::create_length_argument())
    }

    fn register_recovery_argument(command: Command) -> Command {
        command.arg(Self::create_recovery_argument())
    }

    fn create_input_file_argument(help: &'static str) -> Arg {
        Arg::new("input_file")
            .help(help)
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument(help: &'static str) -> Arg {
        Arg::new("output_file")
            .help(help)
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_lsb_count_argument() -> Arg {
        arg!(lsb_count: -n --lsb_count <COUNT> "Number of least significant bits used per sample")
            .default_value("1")
            .value_parser(value_parser!(u8).range(1..=8))
    }

    fn create_message_argument() -> Arg {
        arg!(message: -m --message <TEXT> "Text to hide, prompted for when neither this nor a file is given")
            .required(false)
    }

    fn create_from_file_argument() -> Arg {
        arg!(from_file: -f --from_file <PATH> "Read the text to hide from a file")
            .required(false)
            .value_parser(value_parser!(PathBuf))
            .conflicts_with("message")
    }

    fn create_length_argument() -> Arg {
        arg!(length: -l --length <CHARS> "Number of characters to read, 0 reads the whole image")
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn create_recovery_argument() -> Arg {
        arg!(recovery: -r --recovery <POLICY> "Treatment of bytes outside of ASCII")
            .default_value("Replace")
            .value_parser(value_parser!(RecoveryPolicy))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        match matches.subcommand() {
            Some((ENCODE_COMMAND, sub_matches)) => {
                Arguments::Encode(Self::extract_encode_arguments(sub_matches))
            }
            Some((DECODE_COMMAND, sub_matches)) => {
                Arguments::Decode(Self::extract_decode_arguments(sub_matches))
            }
            _ => unreachable!("A subcommand is required"),
        }
    }

    fn extract_encode_arguments(matches: &ArgMatches) -> EncodeArguments {
        EncodeArguments {
            input_file: Self::extract_input_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            lsb_count: Self::extract_lsb_count_argument(matches),
            gray: matches.get_flag("gray"),
            channels: Self::extract_channel_arguments(matches),
            message_source: Self::extract_message_source(matches),
        }
    }

    fn extract_decode_arguments(matches: &ArgMatches) -> DecodeArguments {
        DecodeArguments {
            input_file: Self::extract_input_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            lsb_count: Self::extract_lsb_count_argument(matches),
            gray: matches.get_flag("gray"),
            channels: Self::extract_channel_arguments(matches),
            max_characters: Self::extract_length_argument(matches),
            recovery_policy: Self::extract_recovery_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Required argument output_file not provided")
            .clone()
    }

    fn extract_lsb_count_argument(matches: &ArgMatches) -> u8 {
        matches
            .get_one::<u8>("lsb_count")
            .expect("Number of least significant bits must be provided, but was unset.")
            .to_owned()
    }

    fn extract_channel_arguments(matches: &ArgMatches) -> ChannelFlags {
        ChannelFlags {
            red: !matches.get_flag("no_red"),
            green: !matches.get_flag("no_green"),
            blue: !matches.get_flag("no_blue"),
        }
    }

    fn extract_message_source(matches: &ArgMatches) -> MessageSource {
        if let Some(path) = matches.get_one::<PathBuf>("from_file") {
            MessageSource::File(path.clone())
        } else if let Some(text) = matches.get_one::<String>("message") {
            MessageSource::Inline(text.clone())
        } else {
            MessageSource::Interactive
        }
    }

    fn extract_length_argument(matches: &ArgMatches) -> Option<usize> {
        matches
            .get_one::<usize>("length")
            .copied()
            .filter(|&length| length > 0)
    }

    fn extract_recovery_argument(matches: &ArgMatches) -> RecoveryPolicy {
        matches
            .get_one::<RecoveryPolicy>("recovery")
            .expect("Recovery policy must be provided, but was unset.")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

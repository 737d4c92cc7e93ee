use std::env::args_os;

use lsb_stego::{hide_text_in_image, reveal_text_from_image, Arguments, CLIParser};

fn main() {
    let mut cli_parser = CLIParser::default();
    match cli_parser.parse(args_os()) {
        Arguments::Encode(arguments) => match hide_text_in_image(&arguments) {
            Ok(summary) => {
                match summary.shortfall {
                    Some(shortfall) => {
                        println!("The message does not fit into the image.");
                        println!("{} characters are missing.", shortfall.missing_characters);
                    }
                    None => println!(
                        "{} of {} possible characters were written to the image.",
                        summary.written_characters, summary.capacity_characters
                    ),
                }
                println!("The distance between the two images is {:.2}.", summary.distance);
            }
            Err(e) => eprintln!("Hiding the message failed because of: {}", e),
        },
        Arguments::Decode(arguments) => match reveal_text_from_image(&arguments) {
            Ok(message) => println!("Obtained message:\n{}", message),
            Err(e) => eprintln!("Reading the message failed because of: {}", e),
        },
    }
}

use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};

use crate::binary_stream::BitStream;

const DEFAULT_CONFIG_PATH: &str = "log4rs.yaml";
const CONFIG_PATH_VARIABLE: &str = "LSB_STEGO_LOG_CONFIG";
const FALLBACK_PATTERN: &str = "{l} {M} - {m}{n}";
const LOGGED_PAYLOAD_BYTES: usize = 16;

#[ctor::ctor]
fn init() {
    let path =
        std::env::var(CONFIG_PATH_VARIABLE).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
    if log4rs::init_file(&path, Default::default()).is_err() {
        init_fallback();
    }
}

fn init_fallback() {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn));
    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("Unable to install logger: {}", e);
            }
        }
        Err(e) => eprintln!("Invalid fallback logging configuration: {}", e),
    }
}

pub fn log_payload(stream: &BitStream) {
    fn get_byte_array(bytes: &[u8]) -> Vec<String> {
        bytes.iter().map(|byte| format!("{:02X}", byte)).collect()
    }
    let bytes = stream.as_bytes();
    let shown = bytes.len().min(LOGGED_PAYLOAD_BYTES);
    log::debug!(
        "payload of {} bits, leading bytes {:?}",
        stream.len(),
        get_byte_array(&bytes[..shown])
    );
}

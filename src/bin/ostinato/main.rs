//! ostinato - demo player: MIDI bytes in, audio device out
//!
//! Run with: cargo run -- [capture.bin | --test-tone]
//!
//! With no argument, raw MIDI bytes are read from stdin:
//!
//!     cat /dev/midi1 | ostinato

mod app;

use app::Input;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let input = match std::env::args().nth(1).as_deref() {
        None => Input::Stdin,
        Some("--test-tone") => Input::TestTone,
        Some(path) => Input::File(path.to_string()),
    };
    app::run(input)
}

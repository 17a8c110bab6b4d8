//! Trace bitmap images into SVG outlines, or assemble them into a font
//! with one glyph per image.

use tracefont::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    match core::run_app(cli_args) {
        Ok(()) => {}
        Err(error) => core::platform::handle_error(error),
    }
}

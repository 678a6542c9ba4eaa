use std::process::ExitCode;

fn main() -> ExitCode {
  wp_demo::run()
}

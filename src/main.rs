use std::process::ExitCode;

fn main() -> ExitCode {
    match flowkpi::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

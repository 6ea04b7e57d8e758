use std::process::ExitCode;

fn main() -> ExitCode {
    match grid_assist_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

use std::process::ExitCode;

fn main() -> ExitCode {
    let Err(err) = classic_ml_mcp::app::run() else {
        return ExitCode::SUCCESS;
    };
    eprintln!("error: {err}");
    ExitCode::from(err.exit_code())
}

mod catalog;
mod cli;
mod output;

use grant_match::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}

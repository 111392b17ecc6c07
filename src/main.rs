mod app;
mod args;
mod entry;
mod error;
mod logger;
mod probe;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}

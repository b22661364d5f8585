use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = filetools::cli::parse();
    app::run(args)
}

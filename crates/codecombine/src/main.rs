use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = codecombine::cli::Cli::parse();
    codecombine::init(cli.verbose);

    codecombine::cli::run(cli)
}

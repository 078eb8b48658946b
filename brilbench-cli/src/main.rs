//! brilbench binary entry point.

fn main() -> anyhow::Result<()> {
    brilbench_cli::run()
}

use clap::Parser;
use lit_ngin::DemoConfig;

fn main() -> anyhow::Result<()> {
    let config = DemoConfig::parse();
    config.validate()?;
    lit_ngin::run(config)
}

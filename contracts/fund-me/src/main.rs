fn main() -> anyhow::Result<()> {
    fund_me::cli::run()
}

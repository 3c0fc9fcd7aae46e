fn main() {
    env_logger::init();
    log::info!("purrsuit starting up");

    let config = std::env::args().nth(1);
    if let Err(e) = purrsuit::driver::run(config.as_deref()) {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

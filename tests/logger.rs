use dedoku::logger;
use log::LevelFilter;

#[test]
fn init_installs_once() {
    assert!(logger::init(LevelFilter::Info).is_ok());
    // a second install is refused, surfaced as an ordinary error
    let err = logger::init(LevelFilter::Info).unwrap_err();
    assert!(!err.to_string().is_empty());
    log::info!("logger installed");
}

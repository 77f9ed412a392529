use super::*;

#[test]
fn binds_loopback_on_default_port() {
    let cfg = DashboardConfig::for_dir(Path::new("."));
    assert_eq!(cfg.bind.to_string(), "127.0.0.1:8050");
    assert_eq!(cfg.url(), "http://127.0.0.1:8050/");
}

#[test]
fn data_dir_is_working_directory() {
    let cfg = DashboardConfig::from_current_dir().unwrap();
    assert_eq!(cfg.data_dir, std::env::current_dir().unwrap());
    assert_eq!(cfg.bind.port(), PORT);
}

#[test]
fn environment_does_not_move_the_server() {
    // Stray variables must not change the bind address.
    std::env::set_var("KCSE_DASH_PORT", "9000");
    std::env::set_var("KCSE_DASH_HOST", "0.0.0.0");
    let cfg = DashboardConfig::from_current_dir().unwrap();
    std::env::remove_var("KCSE_DASH_PORT");
    std::env::remove_var("KCSE_DASH_HOST");
    assert_eq!(cfg.bind, SocketAddr::new(HOST, PORT));
}

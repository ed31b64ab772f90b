/// auth-service 配置，从环境变量读取
pub struct Config {
    /// 服务端口
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5001),
        }
    }
}

/// dishes-service 配置，从环境变量读取
pub struct Config {
    /// 服务端口
    pub port: u16,
    /// 启动时是否灌入示例菜单 (SEED_MENU，默认 true)
    pub seed: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5002),
            seed: std::env::var("SEED_MENU")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

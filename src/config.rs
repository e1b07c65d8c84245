use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/reflection.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub data_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("REFLECTION_HOST")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.port),
            data_path: lookup("REFLECTION_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.addr().port(), 8080);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9191"),
            ("REFLECTION_HOST", "127.0.0.1"),
            ("REFLECTION_DATA_PATH", "/tmp/reflection.json"),
        ]));
        assert_eq!(config.addr(), "127.0.0.1:9191".parse::<SocketAddr>().unwrap());
        assert_eq!(config.data_path, PathBuf::from("/tmp/reflection.json"));
    }

    #[test]
    fn unparsable_port_falls_back() {
        let config = Config::from_lookup(lookup(&[("PORT", "eighty")]));
        assert_eq!(config.port, 8080);
    }
}

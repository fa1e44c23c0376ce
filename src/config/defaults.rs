pub(crate) fn default_page_budget() -> usize {
    3000
}

pub(crate) fn default_normalize() -> bool {
    true
}

pub(crate) fn default_cache_dir() -> String {
    ".cache".to_string()
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}

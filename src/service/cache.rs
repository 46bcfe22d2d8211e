use dashmap::DashMap;

/// 路由缓存版本表: 成功变更后将对应路径版本 +1, 渲染层据此决定是否重算页面
#[derive(Debug, Default)]
pub struct RouteCache {
    versions: DashMap<String, u64>,
}

impl RouteCache {
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// 使路径对应的缓存页失效
    pub fn invalidate(&self, path: &str) {
        *self.versions.entry(path.to_string()).or_insert(0) += 1;
    }

    /// 当前版本号 (从未失效过则为 0)
    pub fn version(&self, path: &str) -> u64 {
        self.versions.get(path).map(|v| *v).unwrap_or(0)
    }
}

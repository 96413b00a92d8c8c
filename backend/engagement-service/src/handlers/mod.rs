pub mod comments;
pub mod health;
pub mod likes;
pub mod notifications;
pub mod relationships;

use serde::Deserialize;

/// Common pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 200)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_clamps_out_of_range_values() {
        let q = PageQuery {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(q.limit(), 200);
        assert_eq!(q.offset(), 0);

        let q = PageQuery {
            limit: None,
            offset: None,
        };
        assert_eq!(q.limit(), 50);
        assert_eq!(q.offset(), 0);
    }
}

//! Query description for the document store
//!
//! Mirrors the three shapes the page needs: fetch by id, fetch the newest,
//! and fetch the nearest neighbour on either side of a timestamp.

use crate::story::StoryId;

pub const DEFAULT_COLLECTION: &str = "short-story";

/// Comparison against the `createdAt` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    LessThan,
    GreaterThan,
}

impl Comparison {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Comparison::LessThan => "<",
            Comparison::GreaterThan => ">",
        }
    }
}

/// Sort direction on `createdAt`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Order::Ascending => "ASC",
            Order::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    IdEq(StoryId),
    CreatedAt(Comparison, i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub collection: String,
    pub filter: Option<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            filter: None,
            order: None,
            limit: None,
        }
    }

    pub fn where_id(mut self, id: StoryId) -> Self {
        self.filter = Some(Filter::IdEq(id));
        self
    }

    pub fn where_created_at(mut self, cmp: Comparison, created_at: i64) -> Self {
        self.filter = Some(Filter::CreatedAt(cmp, created_at));
        self
    }

    pub fn order_by_created_at(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The single story with this id
    pub fn by_id(collection: &str, id: StoryId) -> Self {
        Self::collection(collection).where_id(id)
    }

    /// The single most recently created story
    pub fn latest(collection: &str) -> Self {
        Self::collection(collection)
            .order_by_created_at(Order::Descending)
            .limit(1)
    }

    /// The story with the greatest `createdAt` strictly below `created_at`
    pub fn previous(collection: &str, created_at: i64) -> Self {
        Self::collection(collection)
            .where_created_at(Comparison::LessThan, created_at)
            .order_by_created_at(Order::Descending)
            .limit(1)
    }

    /// The story with the least `createdAt` strictly above `created_at`
    pub fn next(collection: &str, created_at: i64) -> Self {
        Self::collection(collection)
            .where_created_at(Comparison::GreaterThan, created_at)
            .order_by_created_at(Order::Ascending)
            .limit(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_queries_point_toward_the_boundary() {
        let prev = Query::previous(DEFAULT_COLLECTION, 5);
        assert_eq!(prev.filter, Some(Filter::CreatedAt(Comparison::LessThan, 5)));
        assert_eq!(prev.order, Some(Order::Descending));
        assert_eq!(prev.limit, Some(1));

        let next = Query::next(DEFAULT_COLLECTION, 5);
        assert_eq!(next.filter, Some(Filter::CreatedAt(Comparison::GreaterThan, 5)));
        assert_eq!(next.order, Some(Order::Ascending));
        assert_eq!(next.limit, Some(1));
    }
}

//! Order Board
//!
//! The local, de-duplicated collection of the kitchen's orders, and the merge
//! rules that keep it consistent under two update sources:
//! * full refreshes polled from the backend (authoritative, replace everything)
//! * pushed create/update events (upsert by identifier)

pub mod report;
pub mod view;

use crate::order::Order;
use std::collections::HashMap;

/// One change to the board, produced by a worker and applied by the single writer.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardUpdate {
    /// The backend's complete current order list.
    Refreshed(Vec<Order>),
    /// A pushed "new order" event.
    Created(Order),
    /// A pushed "order updated" event.
    Updated(Order),
}

/// Insertion-ordered collection holding at most one order per identifier.
#[derive(Debug, Default, Clone)]
pub struct OrderBoard {
    orders: Vec<Order>,
    index: HashMap<String, usize>,
}

impl OrderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one update using the merge rule for its kind.
    pub fn apply(&mut self, update: BoardUpdate) {
        match update {
            BoardUpdate::Refreshed(orders) => self.on_full_refresh(orders),
            BoardUpdate::Created(order) => self.on_order_created(order),
            BoardUpdate::Updated(order) => self.on_order_updated(order),
        }
    }

    /// Replaces the whole collection with the server's list.
    ///
    /// A repeated identifier in the list keeps its first position and the later copy.
    pub fn on_full_refresh(&mut self, server_orders: Vec<Order>) {
        self.orders.clear();
        self.index.clear();
        for order in server_orders {
            self.upsert(order);
        }
    }

    /// Appends the order unless one with the same identifier is already held.
    pub fn on_order_created(&mut self, order: Order) {
        if self.index.contains_key(&order.id) {
            return;
        }
        self.push(order);
    }

    /// Replaces the order with the same identifier in place, or appends it if unknown.
    pub fn on_order_updated(&mut self, order: Order) {
        self.upsert(order);
    }

    pub fn get(&self, id: &str) -> Option<&Order> {
        self.index.get(id).map(|&i| &self.orders[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Orders in collection order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn upsert(&mut self, order: Order) {
        match self.index.get(&order.id) {
            Some(&i) => self.orders[i] = order,
            None => self.push(order),
        }
    }

    fn push(&mut self, order: Order) {
        self.index.insert(order.id.clone(), self.orders.len());
        self.orders.push(order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderStatus;
    use crate::order::testing::order;
    use std::collections::HashSet;

    fn ids(board: &OrderBoard) -> Vec<&str> {
        board.orders().iter().map(|o| o.id.as_str()).collect()
    }

    fn assert_unique(board: &OrderBoard) {
        let unique: HashSet<&str> = ids(board).into_iter().collect();
        assert_eq!(unique.len(), board.len(), "duplicate ids in {:?}", ids(board));
    }

    #[test]
    fn created_twice_is_same_as_once() {
        let mut once = OrderBoard::new();
        once.on_order_created(order("a", OrderStatus::Pending));

        let mut twice = OrderBoard::new();
        twice.on_order_created(order("a", OrderStatus::Pending));
        twice.on_order_created(order("a", OrderStatus::Pending));

        assert_eq!(once.orders(), twice.orders());
    }

    #[test]
    fn created_does_not_overwrite_existing() {
        let mut board = OrderBoard::new();
        board.on_full_refresh(vec![order("a", OrderStatus::Preparing)]);
        board.on_order_created(order("a", OrderStatus::Pending));

        assert_eq!(board.len(), 1);
        assert_eq!(board.get("a").unwrap().status, OrderStatus::Preparing);
    }

    #[test]
    fn update_of_unknown_order_behaves_like_create() {
        let mut created = OrderBoard::new();
        created.on_order_created(order("x", OrderStatus::Pending));
        created.on_order_created(order("a", OrderStatus::Served));

        let mut updated = OrderBoard::new();
        updated.on_order_created(order("x", OrderStatus::Pending));
        updated.on_order_updated(order("a", OrderStatus::Served));

        assert_eq!(created.orders(), updated.orders());
    }

    #[test]
    fn update_replaces_in_place() {
        let mut board = OrderBoard::new();
        board.on_full_refresh(vec![
            order("a", OrderStatus::Pending),
            order("b", OrderStatus::Pending),
            order("c", OrderStatus::Pending),
        ]);
        board.on_order_updated(order("b", OrderStatus::Preparing));

        assert_eq!(ids(&board), vec!["a", "b", "c"]);
        assert_eq!(board.get("b").unwrap().status, OrderStatus::Preparing);
    }

    #[test]
    fn refresh_replaces_everything() {
        let mut board = OrderBoard::new();
        board.on_order_created(order("stale", OrderStatus::Pending));
        board.on_order_updated(order("a", OrderStatus::Pending));

        let server = vec![
            order("a", OrderStatus::Served),
            order("b", OrderStatus::Pending),
        ];
        board.on_full_refresh(server.clone());

        assert_eq!(board.orders(), server.as_slice());
        assert!(!board.contains("stale"));
    }

    #[test]
    fn refresh_with_repeated_id_keeps_one_copy() {
        let mut board = OrderBoard::new();
        board.on_full_refresh(vec![
            order("a", OrderStatus::Pending),
            order("b", OrderStatus::Pending),
            order("a", OrderStatus::Preparing),
        ]);

        assert_eq!(ids(&board), vec!["a", "b"]);
        assert_eq!(board.get("a").unwrap().status, OrderStatus::Preparing);
    }

    #[test]
    fn no_duplicates_under_interleaved_updates() {
        let statuses = [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Served,
        ];
        let mut board = OrderBoard::new();
        // Deterministic mix of every update kind over a small id space.
        for step in 0..200usize {
            let id = format!("o{}", (step * 7) % 5);
            let status = statuses[step % statuses.len()];
            let update = match step % 4 {
                0 => BoardUpdate::Created(order(&id, status)),
                1 => BoardUpdate::Updated(order(&id, status)),
                2 => BoardUpdate::Created(order(&id, status)),
                _ => {
                    let other = format!("o{}", (step * 3) % 5);
                    BoardUpdate::Refreshed(vec![order(&id, status), order(&other, status)])
                }
            };
            board.apply(update);
            assert_unique(&board);
        }
    }

    #[test]
    fn any_order_converges_after_refresh() {
        let server = vec![
            order("a", OrderStatus::Preparing),
            order("b", OrderStatus::Served),
        ];
        let pushes = vec![
            BoardUpdate::Created(order("a", OrderStatus::Pending)),
            BoardUpdate::Updated(order("b", OrderStatus::Preparing)),
            BoardUpdate::Updated(order("a", OrderStatus::Preparing)),
        ];

        let mut forward = OrderBoard::new();
        for update in pushes.iter().cloned() {
            forward.apply(update);
        }
        forward.apply(BoardUpdate::Refreshed(server.clone()));

        let mut backward = OrderBoard::new();
        for update in pushes.into_iter().rev() {
            backward.apply(update);
        }
        backward.apply(BoardUpdate::Refreshed(server.clone()));

        assert_eq!(forward.orders(), backward.orders());
        assert_eq!(forward.orders(), server.as_slice());
    }
}

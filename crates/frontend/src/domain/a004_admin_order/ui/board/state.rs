//! Состояние канбан-доски заказов.
//!
//! Columns are rebuilt from the server list while nothing is pending. A drop
//! into another column is applied at once and kept until the status update
//! settles: success keeps it, failure restores the snapshot taken before the drop.
//!
//! Every fetch is tagged with the generation it was started in. A move and its
//! settle each bump the generation, so a list requested before or during a move
//! never lands on the board.

use std::collections::BTreeMap;

use contracts::domain::a004_admin_order::aggregate::{AdminOrder, OrderId, OrderStatus};

/// Column → orders, columns ordered as on the board
pub type Buckets = BTreeMap<OrderStatus, Vec<AdminOrder>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Short gesture inside the card's own column: open the detail view
    Click(AdminOrder),
    Unchanged,
    /// Board already shows the order in `target`; the caller sends the update
    Move { order_id: OrderId, target: OrderStatus },
    /// No gesture in progress, or a move is still pending
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragGesture {
    order_id: OrderId,
    started_at_ms: u64,
}

#[derive(Debug, Clone)]
pub struct KanbanBoardState {
    columns: Buckets,
    snapshot: Option<Buckets>,
    drag: Option<DragGesture>,
    pending: bool,
    generation: u64,
    click_threshold_ms: u64,
    pub error: Option<String>,
}

/// Group a server list by status. Every column is present; unknown statuses are dropped.
pub fn group_by_status(orders: Vec<AdminOrder>) -> Buckets {
    let mut buckets: Buckets = OrderStatus::ALL.iter().map(|s| (*s, Vec::new())).collect();
    for order in orders {
        match order.status() {
            Some(status) => buckets.entry(status).or_default().push(order),
            None => log::warn!("Заказ {} со статусом '{}' не показан", order.id, order.status),
        }
    }
    buckets
}

impl KanbanBoardState {
    pub fn new(click_threshold_ms: u64) -> Self {
        Self {
            columns: group_by_status(Vec::new()),
            snapshot: None,
            drag: None,
            pending: false,
            generation: 0,
            click_threshold_ms,
            error: None,
        }
    }

    pub fn columns(&self) -> &Buckets {
        &self.columns
    }

    pub fn column(&self, status: OrderStatus) -> &[AdminOrder] {
        self.columns.get(&status).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn dragged(&self) -> Option<OrderId> {
        self.drag.map(|d| d.order_id)
    }

    fn locate(&self, order_id: OrderId) -> Option<(OrderStatus, &AdminOrder)> {
        self.columns.iter().find_map(|(status, orders)| {
            orders
                .iter()
                .find(|o| o.id == order_id)
                .map(|order| (*status, order))
        })
    }

    /// Tag for a fetch about to start; pass it back to `apply_fetched`
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Rebuild from a fetch. Ignored while a move is pending, and for fetches
    /// started before the last move settled.
    pub fn apply_fetched(&mut self, generation: u64, orders: Vec<AdminOrder>) -> bool {
        if self.pending {
            log::debug!("board: fetched list ignored, status update pending");
            return false;
        }
        if generation != self.generation {
            log::debug!(
                "board: fetched list ignored, started in generation {} (now {})",
                generation,
                self.generation
            );
            return false;
        }
        self.columns = group_by_status(orders);
        true
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn drag_start(&mut self, order_id: OrderId, now_ms: u64) -> bool {
        if self.pending || self.locate(order_id).is_none() {
            return false;
        }
        self.drag = Some(DragGesture {
            order_id,
            started_at_ms: now_ms,
        });
        true
    }

    pub fn drag_cancel(&mut self) {
        self.drag = None;
    }

    pub fn drop_on(&mut self, target: OrderStatus, now_ms: u64) -> DropOutcome {
        let Some(drag) = self.drag.take() else {
            return DropOutcome::Ignored;
        };
        if self.pending {
            return DropOutcome::Ignored;
        }
        let Some((source, order)) = self.locate(drag.order_id) else {
            return DropOutcome::Ignored;
        };

        if source == target {
            let elapsed = now_ms.saturating_sub(drag.started_at_ms);
            return if elapsed < self.click_threshold_ms {
                DropOutcome::Click(order.clone())
            } else {
                DropOutcome::Unchanged
            };
        }

        let mut moved = order.clone();
        moved.status = target.as_str().to_string();
        let mut next = self.columns.clone();
        if let Some(orders) = next.get_mut(&source) {
            orders.retain(|o| o.id != drag.order_id);
        }
        next.entry(target).or_default().push(moved);

        self.snapshot = Some(std::mem::replace(&mut self.columns, next));
        self.pending = true;
        self.error = None;
        self.bump_generation();
        DropOutcome::Move {
            order_id: drag.order_id,
            target,
        }
    }

    /// Plain click on a card; never changes the board
    pub fn click(&self, order_id: OrderId) -> Option<AdminOrder> {
        self.locate(order_id).map(|(_, order)| order.clone())
    }

    pub fn settle_success(&mut self) {
        self.snapshot = None;
        self.pending = false;
        self.bump_generation();
    }

    pub fn settle_failure(&mut self, message: String) {
        if let Some(snapshot) = self.snapshot.take() {
            self.columns = snapshot;
        }
        self.pending = false;
        self.bump_generation();
        self.error = Some(message);
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const THRESHOLD: u64 = 200;

    fn order(n: u128, status: &str) -> AdminOrder {
        AdminOrder {
            id: OrderId::new(Uuid::from_u128(n)),
            customer_email: format!("c{}@example.com", n),
            customer_phone: "79991234567".to_string(),
            recipient_name: "Анна".to_string(),
            recipient_phone: None,
            delivery_city: None,
            delivery_street: None,
            delivery_house: None,
            delivery_apartment: None,
            delivery_floor: None,
            total_amount: 5600,
            status: status.to_string(),
            is_active: true,
            created_at: "2024-11-10T10:00:00Z".to_string(),
        }
    }

    fn id(n: u128) -> OrderId {
        OrderId::new(Uuid::from_u128(n))
    }

    fn ids(state: &KanbanBoardState, status: OrderStatus) -> Vec<OrderId> {
        state.column(status).iter().map(|o| o.id).collect()
    }

    fn board() -> KanbanBoardState {
        let mut state = KanbanBoardState::new(THRESHOLD);
        let generation = state.generation();
        state.apply_fetched(generation, vec![order(1, "paid"), order(2, "processing")]);
        state
    }

    #[test]
    fn test_grouping_keeps_all_columns_and_drops_unknown() {
        let buckets = group_by_status(vec![order(1, "paid"), order(2, "refunded")]);
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets.keys().copied().collect::<Vec<_>>(), OrderStatus::ALL.to_vec());
        assert_eq!(buckets[&OrderStatus::Paid].len(), 1);
        assert!(buckets[&OrderStatus::Processing].is_empty());
    }

    #[test]
    fn test_optimistic_move_then_revert() {
        let mut state = board();
        assert!(state.drag_start(id(1), 1_000));
        let outcome = state.drop_on(OrderStatus::Processing, 2_000);
        assert_eq!(
            outcome,
            DropOutcome::Move {
                order_id: id(1),
                target: OrderStatus::Processing
            }
        );
        assert!(ids(&state, OrderStatus::Paid).is_empty());
        assert_eq!(ids(&state, OrderStatus::Processing), vec![id(2), id(1)]);
        assert_eq!(state.column(OrderStatus::Processing)[1].status, "processing");
        assert!(state.is_pending());

        state.settle_failure("Не удалось изменить статус".to_string());
        assert_eq!(ids(&state, OrderStatus::Paid), vec![id(1)]);
        assert_eq!(ids(&state, OrderStatus::Processing), vec![id(2)]);
        assert_eq!(state.column(OrderStatus::Paid)[0].status, "paid");
        assert!(!state.is_pending());
        assert!(state.error.is_some());

        state.dismiss_error();
        assert!(state.error.is_none());
    }

    #[test]
    fn test_successful_move_kept() {
        let mut state = board();
        state.drag_start(id(1), 0);
        state.drop_on(OrderStatus::Completed, 500);
        state.settle_success();
        assert!(!state.is_pending());
        assert_eq!(ids(&state, OrderStatus::Completed), vec![id(1)]);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_click_never_mutates() {
        let mut state = board();
        let before = state.columns().clone();

        state.drag_start(id(1), 1_000);
        match state.drop_on(OrderStatus::Paid, 1_050) {
            DropOutcome::Click(order) => assert_eq!(order.id, id(1)),
            other => panic!("expected click, got {:?}", other),
        }
        assert_eq!(state.columns(), &before);
        assert!(!state.is_pending());

        assert_eq!(state.click(id(2)).map(|o| o.id), Some(id(2)));
        assert_eq!(state.columns(), &before);
    }

    #[test]
    fn test_long_gesture_in_same_column_unchanged() {
        let mut state = board();
        state.drag_start(id(1), 1_000);
        assert_eq!(state.drop_on(OrderStatus::Paid, 1_000 + THRESHOLD), DropOutcome::Unchanged);
        assert!(!state.is_pending());
    }

    #[test]
    fn test_fetch_suppressed_while_pending() {
        let mut state = board();
        state.drag_start(id(1), 0);
        state.drop_on(OrderStatus::Processing, 1_000);

        // stale server list arrives before the update settles
        let during = state.generation();
        assert!(!state.apply_fetched(during, vec![order(1, "paid"), order(2, "processing")]));
        assert_eq!(ids(&state, OrderStatus::Processing), vec![id(2), id(1)]);

        // no second drag while pending
        assert!(!state.drag_start(id(2), 0));
        assert_eq!(state.drop_on(OrderStatus::Paid, 10), DropOutcome::Ignored);

        state.settle_success();
        let after = state.generation();
        assert!(state.apply_fetched(after, vec![order(1, "processing"), order(2, "processing")]));
        assert_eq!(ids(&state, OrderStatus::Processing), vec![id(1), id(2)]);
    }

    #[test]
    fn test_fetch_started_before_move_dropped_after_settle() {
        let mut state = board();
        // "Обновить" clicked, then the card is dragged before the list comes back
        let before_move = state.generation();
        state.drag_start(id(1), 0);
        state.drop_on(OrderStatus::Processing, 1_000);
        let during_move = state.generation();
        state.settle_success();

        // both old lists land after the settle and still show the order as paid
        assert!(!state.apply_fetched(before_move, vec![order(1, "paid"), order(2, "processing")]));
        assert!(!state.apply_fetched(during_move, vec![order(1, "paid"), order(2, "processing")]));
        assert!(ids(&state, OrderStatus::Paid).is_empty());
        assert_eq!(ids(&state, OrderStatus::Processing), vec![id(2), id(1)]);

        // the refetch issued after the settle is applied
        let refetch = state.generation();
        assert!(state.apply_fetched(refetch, vec![order(1, "processing"), order(2, "processing")]));
        assert_eq!(ids(&state, OrderStatus::Processing), vec![id(1), id(2)]);
    }

    #[test]
    fn test_fetch_started_before_failed_move_dropped() {
        let mut state = board();
        let before_move = state.generation();
        state.drag_start(id(1), 0);
        state.drop_on(OrderStatus::Completed, 1_000);
        state.settle_failure("Не удалось изменить статус".to_string());

        assert!(!state.apply_fetched(before_move, vec![order(2, "paid")]));
        assert_eq!(ids(&state, OrderStatus::Paid), vec![id(1)]);
    }

    #[test]
    fn test_drop_without_drag_ignored() {
        let mut state = board();
        assert_eq!(state.drop_on(OrderStatus::Paid, 0), DropOutcome::Ignored);
        state.drag_start(id(1), 0);
        state.drag_cancel();
        assert_eq!(state.drop_on(OrderStatus::Cancelled, 1_000), DropOutcome::Ignored);
        assert!(!state.drag_start(id(42), 0));
    }
}

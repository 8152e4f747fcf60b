use shared::{CartItem, CartItemId, Price, Selection};

/// In-memory cart for the current session, newest line first
#[derive(Debug, Default)]
pub struct CartState {
    items: Vec<CartItem>,
    /// Whether the cart drawer is shown
    pub open: bool,
}

impl CartState {
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Snapshot a selection into a new cart line at the front of the list.
    /// Returns the id of the new line.
    pub fn add(&mut self, name: &str, selection: &Selection, price: Price) -> CartItemId {
        let id = uuid::Uuid::new_v4().to_string();
        let item = CartItem {
            id: id.clone(),
            name: name.to_string(),
            color: selection.color,
            arm_style: selection.arm_style,
            leg_finish: selection.leg_finish,
            price: price.sale,
            quantity: 1,
        };
        tracing::info!(
            "Added {} ({}, {}) to cart as {id}",
            item.name,
            item.color,
            item.summary()
        );
        self.items.insert(0, item);
        id
    }

    /// Remove a line by id. Unknown ids leave the cart unchanged.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            tracing::info!("Removed cart item {id}");
        }
        removed
    }

    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ArmStyle, HexColor, LegFinish};

    fn selection(r: u8) -> Selection {
        Selection {
            color: HexColor::from_rgb(r, 0, 0),
            arm_style: ArmStyle::Adjustable,
            leg_finish: LegFinish::Aluminum,
        }
    }

    #[test]
    fn test_add_snapshots_selection() {
        let mut cart = CartState::default();
        let id = cart.add("Chair", &selection(10), Price::default());
        let item = cart.get(&id).unwrap();
        assert_eq!(item.color, HexColor::from_rgb(10, 0, 0));
        assert_eq!(item.arm_style, ArmStyle::Adjustable);
        assert_eq!(item.leg_finish, LegFinish::Aluminum);
        assert_eq!(item.price, 200.0);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.name, "Chair");
    }

    #[test]
    fn test_newest_first() {
        let mut cart = CartState::default();
        let first = cart.add("Chair", &selection(1), Price::default());
        let second = cart.add("Chair", &selection(2), Price::default());
        assert_eq!(cart.items()[0].id, second);
        assert_eq!(cart.items()[1].id, first);
    }

    #[test]
    fn test_same_selection_twice_gets_distinct_ids() {
        let mut cart = CartState::default();
        let s = selection(5);
        let a = cart.add("Chair", &s, Price::default());
        let b = cart.add("Chair", &s, Price::default());
        assert_ne!(a, b);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_remove_present_and_absent() {
        let mut cart = CartState::default();
        let a = cart.add("Chair", &selection(1), Price::default());
        let b = cart.add("Chair", &selection(2), Price::default());

        assert!(!cart.remove("no-such-id"));
        assert_eq!(cart.len(), 2);

        assert!(cart.remove(&a));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].id, b);

        assert!(!cart.remove(&a));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_toggle_open() {
        let mut cart = CartState::default();
        assert!(!cart.open);
        cart.toggle_open();
        assert!(cart.open);
        cart.toggle_open();
        assert!(!cart.open);
    }
}

use serde::{Deserialize, Serialize};

/// A sub-item (modifier, side, extra) chosen for one menu in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedItem {
    pub id: String,
    /// Id of the menu this selection belongs to.
    pub menu_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub price: f64,
    /// Base price of the owning menu, used when the menu is not in the cart yet.
    pub menu_price: f64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub total: f64,
}

impl SelectedItem {
    pub fn new(id: impl Into<String>, menu_id: impl Into<String>, price: f64, menu_price: f64) -> Self {
        Self {
            id: id.into(),
            menu_id: menu_id.into(),
            name: None,
            price,
            menu_price,
            quantity: 0,
            total: 0.0,
        }
    }

    fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub base_price: f64,
    #[serde(default)]
    pub selected_items: Vec<SelectedItem>,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, base_price: f64) -> Self {
        Self {
            id: id.into(),
            name: None,
            base_price,
            selected_items: Vec::new(),
        }
    }

    /// Base price plus every selection's price times quantity.
    pub fn line_total(&self) -> f64 {
        self.base_price + self.selected_items.iter().map(SelectedItem::line_total).sum::<f64>()
    }

    fn from_selection(selection: &SelectedItem) -> Self {
        Self::new(selection.menu_id.clone(), selection.menu_price)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    AddToCart(MenuItem),
    AddItemToCart(SelectedItem),
    RemoveFromCart(MenuItem),
    ClearCart,
}

/// Menus in the cart plus the aggregates derived from them.
///
/// `quantity` always equals the number of menus and `total_price` the sum of
/// their [`MenuItem::line_total`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    menus: Vec<MenuItem>,
    quantity: u32,
    total_price: f64,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn menus(&self) -> &[MenuItem] {
        &self.menus
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    #[must_use]
    pub fn reduce(mut self, action: CartAction) -> Self {
        match action {
            CartAction::AddToCart(menu) => self.add_to_cart(menu),
            CartAction::AddItemToCart(selection) => self.add_item_to_cart(selection),
            CartAction::RemoveFromCart(menu) => self.remove_from_cart(&menu),
            CartAction::ClearCart => self = Self::default(),
        }
        self
    }

    fn add_to_cart(&mut self, menu: MenuItem) {
        if self.menus.iter().any(|existing| existing.id == menu.id) {
            return;
        }
        self.menus.push(menu);
        self.recalculate();
    }

    fn add_item_to_cart(&mut self, mut selection: SelectedItem) {
        let index = match self.menus.iter().position(|menu| menu.id == selection.menu_id) {
            Some(index) => index,
            None => {
                self.menus.push(MenuItem::from_selection(&selection));
                self.menus.len() - 1
            }
        };

        let Some(menu) = self.menus.get_mut(index) else {
            return;
        };
        match menu
            .selected_items
            .iter_mut()
            .find(|existing| existing.id == selection.id)
        {
            Some(existing) => {
                existing.quantity += 1;
                existing.total = existing.line_total();
            }
            None => {
                selection.quantity = 1;
                selection.total = selection.price;
                menu.selected_items.push(selection);
            }
        }

        self.recalculate();
    }

    fn remove_from_cart(&mut self, menu: &MenuItem) {
        let Some(index) = self.menus.iter().position(|existing| existing.id == menu.id) else {
            return;
        };
        self.menus.remove(index);
        self.recalculate();
    }

    /// Both aggregates are derived from `menus` after every change.
    fn recalculate(&mut self) {
        self.quantity = u32::try_from(self.menus.len()).unwrap_or(u32::MAX);
        self.total_price = self.menus.iter().fold(0.0, |total, menu| total + menu.line_total());
    }
}

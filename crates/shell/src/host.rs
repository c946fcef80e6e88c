//! Host side of the shell: keeps the catalogue and reports totals.

use cataloger_entry::{EntryError, Field, ItemHost, Notice};
use cataloger_inventory::{Item, Price};

/// Collects emitted items and buffers the lines the shell should print next.
#[derive(Debug, Default)]
pub struct CatalogHost {
    items: Vec<Item>,
    total: Price,
    output: Vec<String>,
}

impl CatalogHost {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn total(&self) -> Price {
        self.total
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn drain_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }
}

impl ItemHost for CatalogHost {
    fn on_item_ready(&mut self, item: Item) {
        let line = serde_json::to_string(&item)
            .unwrap_or_else(|e| format!("<item could not be rendered: {e}>"));
        self.output.push(format!("added {line}"));
        self.items.push(item);
    }

    fn on_totals_changed(&mut self) {
        self.total = self.items.iter().map(Item::price).sum();
        self.output
            .push(format!("{} item(s), total {}", self.items.len(), self.total));
    }

    fn annotate(&mut self, field: Field, error: Option<&EntryError>) {
        if let Some(error) = error {
            self.output.push(format!("  {field}: {error}"));
        }
    }

    fn notify(&mut self, notice: &Notice) {
        self.output.push(format!("! {notice}"));
    }
}

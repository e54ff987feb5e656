//! The order table: a full-replace projection of the service's order list.

use unicode_width::UnicodeWidthStr;

use crate::models::Order;

const HEADERS: [&str; 5] = ["ID", "Símbolo", "Lado", "Status", "Ações"];

/// Per-row actions, bound to keys in the orders panel.
pub const ROW_ACTIONS: &str = "[m] Monitorar [x] Cancelar";

/// Column separator shared by the panel and [`OrdersTable::markup`].
pub const SEPARATOR: &str = " | ";

/// One rendered row. Cells are sanitized copies of the order's fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderRow {
    pub id: String,
    pub symbol: String,
    pub side: String,
    pub status: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: sanitize(&order.id),
            symbol: sanitize(&order.symbol),
            side: sanitize(order.side.as_str()),
            status: sanitize(&order.status),
        }
    }
}

impl OrderRow {
    fn cells(&self) -> [&str; 5] {
        [&self.id, &self.symbol, &self.side, &self.status, ROW_ACTIONS]
    }
}

/// Replaces control characters (ANSI escape introducers included) with
/// U+FFFD so server text cannot drive the terminal.
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_control() { '\u{FFFD}' } else { c })
        .collect()
}

/// Table state: the last order list received and the selected row.
#[derive(Clone, Debug, Default)]
pub struct OrdersTable {
    orders: Vec<Order>,
    rows: Vec<OrderRow>,
    selected: usize,
}

impl OrdersTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole table body with `orders`.
    ///
    /// Nothing from the previous contents survives except the selection
    /// index, which is clamped to the new length.
    pub fn replace(&mut self, orders: Vec<Order>) {
        self.rows = orders.iter().map(OrderRow::from).collect();
        self.orders = orders;
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn rows(&self) -> &[OrderRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        (!self.rows.is_empty()).then_some(self.selected)
    }

    /// The order the row actions apply to.
    pub fn selected_order(&self) -> Option<&Order> {
        self.orders.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Column widths: the widest of the header and every cell in each column.
    fn widths(&self) -> [usize; 5] {
        let mut widths = HEADERS.map(UnicodeWidthStr::width);
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.width());
            }
        }
        widths
    }

    /// Header cells padded to the column widths.
    pub fn header_cells(&self) -> [String; 5] {
        pad_cells(HEADERS, self.widths())
    }

    /// Every row's cells padded to the column widths, in table order.
    ///
    /// The orders panel draws exactly these cells, joined by [`SEPARATOR`].
    pub fn row_cells(&self) -> Vec<[String; 5]> {
        let widths = self.widths();
        self.rows
            .iter()
            .map(|row| pad_cells(row.cells(), widths))
            .collect()
    }

    /// Plain-text rendering of the table, one line per row under a header.
    ///
    /// Depends only on the rows, so identical order lists give identical
    /// output.
    pub fn markup(&self) -> String {
        let mut out = join_cells(&self.header_cells());
        for cells in self.row_cells() {
            out.push('\n');
            out.push_str(&join_cells(&cells));
        }
        out
    }
}

fn pad_cells(cells: [&str; 5], widths: [usize; 5]) -> [String; 5] {
    std::array::from_fn(|i| {
        let pad = widths[i].saturating_sub(cells[i].width());
        format!("{}{}", cells[i], " ".repeat(pad))
    })
}

/// One table line as text, trailing padding removed.
fn join_cells(cells: &[String; 5]) -> String {
    cells.join(SEPARATOR).trim_end().to_string()
}

/// The capability of replacing the rendered order table.
pub trait OrderView {
    fn replace_orders(&self, orders: Vec<Order>);
}

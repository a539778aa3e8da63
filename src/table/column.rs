use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::inventory::{InventoryRow, Status, VehicleOption};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnId {
    Vin,
    Distance,
    Dealer,
    Model,
    Color,
    Seating,
    Msrp,
    Tsrp,
    Markup,
    Price,
    Status,
    EstDate,
    Presold,
    PortOptions,
    FactoryOptions,
    DealerOptions,
}

impl ColumnId {
    pub const ALL: [ColumnId; 16] = [
        ColumnId::Vin,
        ColumnId::Distance,
        ColumnId::Dealer,
        ColumnId::Model,
        ColumnId::Color,
        ColumnId::Seating,
        ColumnId::Msrp,
        ColumnId::Tsrp,
        ColumnId::Markup,
        ColumnId::Price,
        ColumnId::Status,
        ColumnId::EstDate,
        ColumnId::Presold,
        ColumnId::PortOptions,
        ColumnId::FactoryOptions,
        ColumnId::DealerOptions,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnId::Vin => "vin",
            ColumnId::Distance => "distance",
            ColumnId::Dealer => "dealer",
            ColumnId::Model => "model",
            ColumnId::Color => "color",
            ColumnId::Seating => "seating",
            ColumnId::Msrp => "msrp",
            ColumnId::Tsrp => "tsrp",
            ColumnId::Markup => "markup",
            ColumnId::Price => "price",
            ColumnId::Status => "status",
            ColumnId::EstDate => "estDate",
            ColumnId::Presold => "presold",
            ColumnId::PortOptions => "portOptions",
            ColumnId::FactoryOptions => "factoryOptions",
            ColumnId::DealerOptions => "dealerOptions",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == raw)
    }

    /// Header label: "dealerOptions" -> "dealer Options", MSRP/TSRP upper-cased.
    pub fn label(self) -> String {
        match self {
            ColumnId::Msrp | ColumnId::Tsrp => self.as_str().to_uppercase(),
            _ => {
                let mut out = String::new();
                for (i, ch) in self.as_str().chars().enumerate() {
                    if i == 0 {
                        out.extend(ch.to_uppercase());
                    } else if ch.is_uppercase() {
                        out.push(' ');
                        out.push(ch);
                    } else {
                        out.push(ch);
                    }
                }
                out
            }
        }
    }

    pub fn cell(self, row: &InventoryRow) -> Cell<'_> {
        match self {
            ColumnId::Vin => Cell::Text(&row.vin),
            ColumnId::Distance => Cell::Number(row.distance),
            ColumnId::Dealer => Cell::Text(&row.dealer),
            ColumnId::Model => Cell::Text(&row.model),
            ColumnId::Color => Cell::Text(&row.color),
            ColumnId::Seating => Cell::Text(&row.seating),
            ColumnId::Msrp => Cell::Number(row.msrp),
            ColumnId::Tsrp => Cell::Number(row.tsrp),
            ColumnId::Markup => Cell::Number(row.markup),
            ColumnId::Price => Cell::Number(row.price),
            ColumnId::Status => Cell::Status(row.status),
            ColumnId::EstDate => Cell::Text(&row.est_date),
            ColumnId::Presold => Cell::Flag(row.presold),
            ColumnId::PortOptions => Cell::Options(&row.port_options),
            ColumnId::FactoryOptions => Cell::Options(&row.factory_options),
            ColumnId::DealerOptions => Cell::Options(&row.dealer_options),
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed view of one row's value in one column.
#[derive(Debug, Clone, Copy)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Status(Status),
    Flag(bool),
    Options(&'a [Rc<VehicleOption>]),
}

impl Cell<'_> {
    /// The string a select filter or facet matches against.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Cell::Text(s) => Some((*s).to_string()),
            Cell::Number(n) => Some(n.to_string()),
            Cell::Status(s) => Some(s.as_str().to_string()),
            Cell::Flag(b) => Some(yes_no(*b).to_string()),
            Cell::Options(_) => None,
        }
    }

    pub fn option_codes(&self) -> impl Iterator<Item = &str> {
        let options: &[Rc<VehicleOption>] = match self {
            Cell::Options(options) => options,
            _ => &[],
        };
        options.iter().map(|o| o.option_cd.as_str())
    }

    pub fn compare(&self, other: &Cell<'_>) -> Ordering {
        match (self, other) {
            (Cell::Number(a), Cell::Number(b)) => a.total_cmp(b),
            (Cell::Status(a), Cell::Status(b)) => a.cmp(b),
            (Cell::Flag(a), Cell::Flag(b)) => a.cmp(b),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            (Cell::Options(_), Cell::Options(_)) => joined_codes(self).cmp(&joined_codes(other)),
            // one column always yields one variant
            _ => Ordering::Equal,
        }
    }
}

fn joined_codes(cell: &Cell<'_>) -> String {
    cell.option_codes().collect::<Vec<_>>().join(" ")
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Which control a column offers and which URL codec backs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterVariant {
    /// Free-text substring search.
    Search,
    /// Inclusive `[min, max]`, either end open.
    Range,
    /// One or more scalar values.
    Select,
    /// One or more option codes, "any" semantics.
    MultiSelect,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub id: ColumnId,
    pub filter: FilterVariant,
    pub sortable: bool,
}

impl Column {
    const fn new(id: ColumnId, filter: FilterVariant) -> Self {
        Self {
            id,
            filter,
            sortable: true,
        }
    }

    const fn unsortable(self) -> Self {
        Self {
            sortable: false,
            ..self
        }
    }

    pub fn is_money(&self) -> bool {
        matches!(
            self.id,
            ColumnId::Msrp | ColumnId::Tsrp | ColumnId::Markup | ColumnId::Price
        )
    }
}

pub const INVENTORY_COLUMNS: [Column; 16] = [
    Column::new(ColumnId::Vin, FilterVariant::Search).unsortable(),
    Column::new(ColumnId::Distance, FilterVariant::Range),
    Column::new(ColumnId::Dealer, FilterVariant::Select),
    Column::new(ColumnId::Model, FilterVariant::Select),
    Column::new(ColumnId::Color, FilterVariant::Select),
    Column::new(ColumnId::Seating, FilterVariant::Select),
    Column::new(ColumnId::Msrp, FilterVariant::Range),
    Column::new(ColumnId::Tsrp, FilterVariant::Range),
    Column::new(ColumnId::Markup, FilterVariant::Range),
    Column::new(ColumnId::Price, FilterVariant::Range),
    Column::new(ColumnId::Status, FilterVariant::Select),
    Column::new(ColumnId::EstDate, FilterVariant::None),
    Column::new(ColumnId::Presold, FilterVariant::Select),
    Column::new(ColumnId::PortOptions, FilterVariant::MultiSelect),
    Column::new(ColumnId::FactoryOptions, FilterVariant::MultiSelect),
    Column::new(ColumnId::DealerOptions, FilterVariant::MultiSelect),
];

pub fn column(id: ColumnId) -> Column {
    INVENTORY_COLUMNS
        .into_iter()
        .find(|c| c.id == id)
        .unwrap_or(Column::new(id, FilterVariant::None))
}

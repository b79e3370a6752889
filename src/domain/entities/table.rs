use std::collections::{BTreeMap, BTreeSet};

use crate::domain::entities::unit::{Unit, UnitId};

/// Filter value that clears a categorical column filter.
pub const ALL_FILTER_VALUE: &str = "all";

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnKey {
    Id,
    UnitName,
    UnitType,
    Location,
    VehicleReg,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Value must equal the filter exactly; `ALL_FILTER_VALUE` disables the filter.
    Exact,
    /// Value must contain the filter, case-sensitive.
    Contains,
}

impl ColumnKey {
    pub const ALL: [ColumnKey; 6] = [
        ColumnKey::Id,
        ColumnKey::UnitName,
        ColumnKey::UnitType,
        ColumnKey::Location,
        ColumnKey::VehicleReg,
        ColumnKey::Status,
    ];

    /// Accessor key, matching the JSON field name.
    pub fn key(self) -> &'static str {
        match self {
            ColumnKey::Id => "id",
            ColumnKey::UnitName => "unitName",
            ColumnKey::UnitType => "unitType",
            ColumnKey::Location => "location",
            ColumnKey::VehicleReg => "vehicleReg",
            ColumnKey::Status => "status",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            ColumnKey::Id => "Unit ID",
            ColumnKey::UnitName => "Unit Name",
            ColumnKey::UnitType => "Unit Type",
            ColumnKey::Location => "Location",
            ColumnKey::VehicleReg => "Vehicle Reg",
            ColumnKey::Status => "Status",
        }
    }

    pub fn from_key(key: &str) -> Option<ColumnKey> {
        ColumnKey::ALL.into_iter().find(|column| column.key() == key)
    }

    pub fn match_rule(self) -> MatchRule {
        match self {
            ColumnKey::UnitType | ColumnKey::Status => MatchRule::Exact,
            ColumnKey::Id | ColumnKey::UnitName | ColumnKey::Location | ColumnKey::VehicleReg => {
                MatchRule::Contains
            }
        }
    }

    /// Only the unit name header carries a sort toggle.
    pub fn is_sortable(self) -> bool {
        matches!(self, ColumnKey::UnitName)
    }

    pub fn value(self, unit: &Unit) -> &str {
        match self {
            ColumnKey::Id => &unit.id.0,
            ColumnKey::UnitName => &unit.unit_name,
            ColumnKey::UnitType => &unit.unit_type,
            ColumnKey::Location => &unit.location,
            ColumnKey::VehicleReg => &unit.vehicle_reg,
            ColumnKey::Status => unit.status.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: ColumnKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(column: ColumnKey) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: ColumnKey) -> Self {
        Self {
            column,
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size.max(1))
    }
}

/// View configuration owned by the table. Independent of the unit data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    pub sorting: Vec<SortSpec>,
    pub filters: BTreeMap<ColumnKey, String>,
    pub column_visibility: BTreeMap<ColumnKey, bool>,
    pub selection: BTreeSet<UnitId>,
    pub pagination: Pagination,
}

impl TableState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            pagination: Pagination {
                page_index: 0,
                page_size: page_size.max(1),
            },
            ..Self::default()
        }
    }

    pub fn is_column_visible(&self, column: ColumnKey) -> bool {
        self.column_visibility.get(&column).copied().unwrap_or(true)
    }

    pub fn filter_value(&self, column: ColumnKey) -> &str {
        self.filters.get(&column).map(String::as_str).unwrap_or("")
    }

    pub fn sort_direction(&self, column: ColumnKey) -> Option<SortDirection> {
        self.sorting
            .iter()
            .find(|spec| spec.column == column)
            .map(|spec| spec.direction)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

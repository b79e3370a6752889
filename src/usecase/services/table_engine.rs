use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::domain::entities::table::{
    ColumnKey, MatchRule, PageItem, Pagination, SortDirection, SortSpec, TableState,
    ALL_FILTER_VALUE,
};
use crate::domain::entities::unit::{Unit, UnitId};
use crate::usecase::services::pagination::page_numbers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRow<'a> {
    pub unit: &'a Unit,
    pub selected: bool,
}

/// Everything the table renders for one state of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView<'a> {
    pub rows: Vec<ViewRow<'a>>,
    pub visible_columns: Vec<ColumnKey>,
    pub filtered_count: usize,
    pub selected_filtered_count: usize,
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub can_previous: bool,
    pub can_next: bool,
    pub all_page_rows_selected: bool,
    pub some_page_rows_selected: bool,
    pub page_items: Vec<PageItem>,
}

impl TableView<'_> {
    /// 1-based page number for display.
    pub fn current_page(&self) -> usize {
        self.page_index.saturating_add(1)
    }

    /// True when nothing is rendered on the current page ("No results.").
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_page_out_of_range(&self) -> bool {
        self.filtered_count > 0 && self.page_index >= self.page_count
    }
}

pub fn matches_filter(column: ColumnKey, value: &str, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    match column.match_rule() {
        MatchRule::Exact => filter == ALL_FILTER_VALUE || value == filter,
        MatchRule::Contains => value.contains(filter),
    }
}

pub fn filter_units<'a>(units: &'a [Unit], filters: &BTreeMap<ColumnKey, String>) -> Vec<&'a Unit> {
    units
        .iter()
        .filter(|unit| {
            filters
                .iter()
                .all(|(column, filter)| matches_filter(*column, column.value(unit), filter))
        })
        .collect()
}

fn compare_units(a: &Unit, b: &Unit, sorting: &[SortSpec]) -> Ordering {
    for spec in sorting {
        let ordering = spec.column.value(a).cmp(spec.column.value(b));
        let ordering = match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Stable sort; rows comparing equal keep their source order.
pub fn sort_units(rows: &mut [&Unit], sorting: &[SortSpec]) {
    if sorting.is_empty() {
        return;
    }
    rows.sort_by(|a, b| compare_units(a, b, sorting));
}

/// Rows of the requested page. A page past the end is empty, never clamped.
pub fn page_slice<'r, T>(rows: &'r [T], pagination: &Pagination) -> &'r [T] {
    let page_size = pagination.page_size.max(1);
    let start = pagination.page_index.saturating_mul(page_size);
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

pub fn compute_view<'a>(units: &'a [Unit], state: &TableState) -> TableView<'a> {
    let mut filtered = filter_units(units, &state.filters);
    sort_units(&mut filtered, &state.sorting);

    let filtered_count = filtered.len();
    let selected_filtered_count = filtered
        .iter()
        .filter(|unit| state.selection.contains(&unit.id))
        .count();

    let pagination = state.pagination;
    let page_count = pagination.page_count(filtered_count);
    let rows: Vec<ViewRow<'a>> = page_slice(&filtered, &pagination)
        .iter()
        .map(|unit| ViewRow {
            unit: *unit,
            selected: state.selection.contains(&unit.id),
        })
        .collect();

    let selected_on_page = rows.iter().filter(|row| row.selected).count();
    let all_page_rows_selected = !rows.is_empty() && selected_on_page == rows.len();

    TableView {
        visible_columns: ColumnKey::ALL
            .into_iter()
            .filter(|column| state.is_column_visible(*column))
            .collect(),
        filtered_count,
        selected_filtered_count,
        page_index: pagination.page_index,
        page_size: pagination.page_size,
        page_count,
        can_previous: pagination.page_index > 0,
        can_next: pagination.page_index.saturating_add(1) < page_count,
        all_page_rows_selected,
        some_page_rows_selected: selected_on_page > 0 && !all_page_rows_selected,
        page_items: page_numbers(pagination.page_index.saturating_add(1), page_count),
        rows,
    }
}

/// Owns the loaded units and the table state. Every state change hands back
/// the freshly derived view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableEngine {
    units: Vec<Unit>,
    state: TableState,
}

impl TableEngine {
    pub fn new(units: Vec<Unit>, state: TableState) -> Self {
        Self { units, state }
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self::new(Vec::new(), TableState::with_page_size(page_size))
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn view(&self) -> TableView<'_> {
        compute_view(&self.units, &self.state)
    }

    /// Selection is pruned to ids present in the new collection.
    pub fn replace_units(&mut self, units: Vec<Unit>) -> TableView<'_> {
        let present: HashSet<&UnitId> = units.iter().map(|unit| &unit.id).collect();
        self.state.selection.retain(|id| present.contains(id));
        debug!(units = units.len(), "table data replaced");
        self.units = units;
        self.view()
    }

    pub fn set_filter(&mut self, column: ColumnKey, value: impl Into<String>) -> TableView<'_> {
        let value = value.into();
        let clears = value.is_empty()
            || (column.match_rule() == MatchRule::Exact && value == ALL_FILTER_VALUE);
        if clears {
            self.state.filters.remove(&column);
        } else {
            self.state.filters.insert(column, value);
        }
        self.view()
    }

    pub fn clear_filters(&mut self) -> TableView<'_> {
        self.state.filters.clear();
        self.view()
    }

    /// Ascending unless the column is already ascending. Replaces any other sort.
    pub fn toggle_sort(&mut self, column: ColumnKey) -> TableView<'_> {
        let spec = match self.state.sort_direction(column) {
            Some(SortDirection::Asc) => SortSpec::desc(column),
            _ => SortSpec::asc(column),
        };
        self.state.sorting = vec![spec];
        self.view()
    }

    pub fn set_sorting(&mut self, sorting: Vec<SortSpec>) -> TableView<'_> {
        self.state.sorting = sorting;
        self.view()
    }

    pub fn set_column_visibility(&mut self, column: ColumnKey, visible: bool) -> TableView<'_> {
        self.state.column_visibility.insert(column, visible);
        self.view()
    }

    pub fn toggle_column_visibility(&mut self, column: ColumnKey) -> TableView<'_> {
        let visible = self.state.is_column_visible(column);
        self.set_column_visibility(column, !visible)
    }

    pub fn set_row_selected(&mut self, id: &UnitId, selected: bool) -> TableView<'_> {
        if selected {
            self.state.selection.insert(id.clone());
        } else {
            self.state.selection.remove(id);
        }
        self.view()
    }

    pub fn toggle_row_selected(&mut self, id: &UnitId) -> TableView<'_> {
        let selected = self.state.selection.contains(id);
        self.set_row_selected(id, !selected)
    }

    /// Applies only to rows rendered on the current page.
    pub fn toggle_all_page_rows_selected(&mut self, selected: bool) -> TableView<'_> {
        let page_ids: Vec<UnitId> = self
            .view()
            .rows
            .iter()
            .map(|row| row.unit.id.clone())
            .collect();
        for id in page_ids {
            if selected {
                self.state.selection.insert(id);
            } else {
                self.state.selection.remove(&id);
            }
        }
        self.view()
    }

    pub fn clear_selection(&mut self) -> TableView<'_> {
        self.state.selection.clear();
        self.view()
    }

    pub fn selected_units(&self) -> Vec<&Unit> {
        self.units
            .iter()
            .filter(|unit| self.state.selection.contains(&unit.id))
            .collect()
    }

    pub fn set_page_index(&mut self, page_index: usize) -> TableView<'_> {
        self.state.pagination.page_index = page_index;
        self.view()
    }

    pub fn next_page(&mut self) -> TableView<'_> {
        if self.view().can_next {
            self.state.pagination.page_index += 1;
        }
        self.view()
    }

    pub fn previous_page(&mut self) -> TableView<'_> {
        if self.state.pagination.page_index > 0 {
            self.state.pagination.page_index -= 1;
        }
        self.view()
    }

    /// Keeps the first row of the current page on screen.
    pub fn set_page_size(&mut self, page_size: usize) -> TableView<'_> {
        let page_size = page_size.max(1);
        let pagination = &mut self.state.pagination;
        let top_row = pagination.page_index.saturating_mul(pagination.page_size);
        pagination.page_index = top_row / page_size;
        pagination.page_size = page_size;
        debug!(page_size, page_index = pagination.page_index, "page size changed");
        self.view()
    }
}

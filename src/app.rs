use std::collections::BTreeMap;

use dioxus::prelude::*;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use fleet_console::config::ClientConfig;
use fleet_console::domain::entities::table::{ColumnKey, PageItem, SortDirection, ALL_FILTER_VALUE};
use fleet_console::domain::entities::unit::{Unit, UnitStatus, KNOWN_UNIT_TYPES};
use fleet_console::usecase::ports::unit_source::FetchError;
use fleet_console::usecase::services::unit_store::LoadState;

use crate::ui::state::app_state::{AppState, EditorMode, EditorState};
use crate::ui::style::{
    button_style, status_badge_style, table_cell_style, table_container_style,
    table_header_cell_style,
};

const PAGE_SIZE_CHOICES: [usize; 4] = [5, 10, 20, 50];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DropdownId {
    UnitType,
    Status,
    ColumnVisibility,
    PageSize,
    RowActions(usize),
}

#[derive(Clone, Debug, PartialEq)]
struct DropdownOption {
    value: String,
    label: String,
}

impl DropdownOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

fn dropdown_label(options: &[DropdownOption], selected: Option<&str>) -> String {
    selected
        .and_then(|value| options.iter().find(|opt| opt.value == value))
        .map(|opt| opt.label.clone())
        .unwrap_or_else(|| "⋯".to_string())
}

fn category_options(values: &[&str], all_label: &str) -> Vec<DropdownOption> {
    std::iter::once(DropdownOption::new(ALL_FILTER_VALUE, all_label))
        .chain(values.iter().map(|value| DropdownOption::new(*value, *value)))
        .collect()
}

fn parse_status(value: &str) -> UnitStatus {
    if value == UnitStatus::Disabled.as_str() {
        UnitStatus::Disabled
    } else {
        UnitStatus::Enabled
    }
}

fn command_failed(operation: &str, err: &FetchError) -> String {
    format!("Could not {operation} unit ({}). Check that the units service is running.", err.kind())
}

#[component]
fn DropdownSelect(
    id: DropdownId,
    label: &'static str,
    options: Vec<DropdownOption>,
    selected: Option<String>,
    mut open_dropdown: Signal<Option<DropdownId>>,
    mut dropdown_pos: Signal<Option<(f64, f64)>>,
    on_select: EventHandler<String>,
) -> Element {
    let is_open = open_dropdown() == Some(id);
    let selected_label = dropdown_label(&options, selected.as_deref());
    let (left, top) = dropdown_pos().unwrap_or((0.0, 0.0));

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            if !label.is_empty() {
                span { "{label}" }
            }
            button {
                style: "{button_style(false)}",
                onclick: move |event| {
                    event.stop_propagation();
                    if open_dropdown() == Some(id) {
                        open_dropdown.set(None);
                        return;
                    }
                    let point = event.client_coordinates();
                    dropdown_pos.set(Some((point.x, point.y + 24.0)));
                    open_dropdown.set(Some(id));
                },
                "{selected_label}"
            }
        }

        if is_open {
            div {
                style: "position: fixed; left: {left}px; top: {top}px; min-width: 200px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200;",
                onclick: move |event| event.stop_propagation(),
                {options.iter().map(|opt| {
                    let value = opt.value.clone();
                    let label = opt.label.clone();
                    let is_selected = selected.as_deref() == Some(value.as_str());
                    let background = if is_selected { "#eef4ff" } else { "transparent" };
                    rsx!(
                        div {
                            style: "padding: 8px 10px; cursor: pointer; background: {background};",
                            onclick: move |_| {
                                on_select.call(value.clone());
                                open_dropdown.set(None);
                            },
                            "{label}"
                        }
                    )
                })}
            }
        }
    }
}

#[component]
fn ColumnVisibilityDropdown(
    id: DropdownId,
    visibility: BTreeMap<ColumnKey, bool>,
    mut open_dropdown: Signal<Option<DropdownId>>,
    mut dropdown_pos: Signal<Option<(f64, f64)>>,
    on_toggle: EventHandler<ColumnKey>,
) -> Element {
    let is_open = open_dropdown() == Some(id);
    let (left, top) = dropdown_pos().unwrap_or((0.0, 0.0));

    rsx! {
        button {
            style: "{button_style(false)}",
            onclick: move |event| {
                event.stop_propagation();
                if open_dropdown() == Some(id) {
                    open_dropdown.set(None);
                    return;
                }
                let point = event.client_coordinates();
                dropdown_pos.set(Some((point.x, point.y + 24.0)));
                open_dropdown.set(Some(id));
            },
            "Columns ▾"
        }

        if is_open {
            div {
                style: "position: fixed; left: {left}px; top: {top}px; min-width: 200px; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; padding: 6px;",
                onclick: move |event| event.stop_propagation(),
                {ColumnKey::ALL.into_iter().map(|column| {
                    let checked = visibility.get(&column).copied().unwrap_or(true);
                    let key = column.key();
                    rsx!(
                        label {
                            style: "display: flex; align-items: center; gap: 8px; padding: 6px 4px; cursor: pointer;",
                            input {
                                r#type: "checkbox",
                                checked: checked,
                                onclick: move |_| on_toggle.call(column),
                            }
                            span { "{key}" }
                        }
                    )
                })}
            }
        }
    }
}

#[component]
pub fn App() -> Element {
    let config = use_context::<ClientConfig>();

    let AppState {
        mut store,
        mut engine,
        commands,
        mut busy,
        mut status,
        mut show_filters,
        mut editor,
        mut details,
    } = AppState::new(&config);

    let mut open_dropdown = use_signal(|| None::<DropdownId>);
    let dropdown_pos = use_signal(|| None::<(f64, f64)>);

    let mut load_units = move || {
        let source = store.peek().source();
        store.write().begin_fetch();
        spawn(async move {
            let result = source.fetch_all().await;
            let loaded = store.write().apply_fetch(result).map(|units| units.to_vec());
            match loaded {
                Ok(units) => {
                    let count = units.len();
                    engine.write().replace_units(units);
                    status.set(format!("Loaded {count} units"));
                }
                Err(err) => status.set(err.user_message().to_string()),
            }
        });
    };

    use_effect(move || load_units());

    let mut on_row_action = move |action: String, unit: Unit| match action.as_str() {
        "copy" => {
            let literal = serde_json::to_string(&unit.id.0).unwrap_or_default();
            let _ = dioxus::document::eval(&format!("navigator.clipboard.writeText({literal})"));
            status.set(format!("Copied {}", unit.id));
        }
        "view" => {
            let commands = commands.peek().clone();
            busy.set(true);
            spawn(async move {
                match commands.details(&unit.id).await {
                    Ok(found) => details.set(Some(found)),
                    Err(err) => status.set(command_failed("load", &err)),
                }
                busy.set(false);
            });
        }
        "edit" => editor.set(Some(EditorState::edit(&unit))),
        "delete" => {
            let confirmed = MessageDialog::new()
                .set_level(MessageLevel::Warning)
                .set_title("Delete unit")
                .set_description(format!("Delete {} ({})?", unit.unit_name, unit.id))
                .set_buttons(MessageButtons::YesNo)
                .show();
            if confirmed != MessageDialogResult::Yes {
                status.set("Delete cancelled".to_string());
                return;
            }
            let commands = commands.peek().clone();
            busy.set(true);
            spawn(async move {
                match commands.delete(&unit.id).await {
                    Ok(receipt) => status.set(receipt.message),
                    Err(err) => status.set(command_failed("delete", &err)),
                }
                busy.set(false);
            });
        }
        _ => {}
    };

    let save_editor = move |_: MouseEvent| {
        let Some(current) = editor() else {
            return;
        };
        let commands = commands.peek().clone();
        busy.set(true);
        spawn(async move {
            let (operation, result) = match &current.mode {
                EditorMode::Create => ("create", commands.create(current.draft.clone()).await),
                EditorMode::Edit(id) => ("update", commands.update(id, current.draft.clone()).await),
            };
            match result {
                Ok(receipt) => {
                    status.set(receipt.message);
                    editor.set(None);
                }
                Err(err) => status.set(command_failed(operation, &err)),
            }
            busy.set(false);
        });
    };

    let load_state = store.read().load_state().clone();
    match load_state {
        LoadState::Loading => {
            return rsx! {
                div {
                    style: "display: flex; align-items: center; justify-content: center; min-height: 100vh; font-size: 18px;",
                    "Loading units..."
                }
            };
        }
        LoadState::Failed(err) => {
            let message = err.user_message();
            return rsx! {
                div {
                    style: "display: flex; flex-direction: column; gap: 12px; align-items: center; justify-content: center; min-height: 100vh;",
                    div { style: "color: #c00;", "Error: {message}" }
                    button {
                        style: "{button_style(false)}",
                        onclick: move |_| load_units(),
                        "Retry"
                    }
                }
            };
        }
        LoadState::Ready => {}
    }

    let engine_read = engine.read();
    let table_state = engine_read.state();
    let view = engine_read.view();

    let search_value = table_state.filter_value(ColumnKey::UnitName).to_string();
    let location_value = table_state.filter_value(ColumnKey::Location).to_string();
    let reg_value = table_state.filter_value(ColumnKey::VehicleReg).to_string();
    let selected_type = Some(table_state.filter_value(ColumnKey::UnitType))
        .filter(|value| !value.is_empty())
        .unwrap_or(ALL_FILTER_VALUE)
        .to_string();
    let selected_status = Some(table_state.filter_value(ColumnKey::Status))
        .filter(|value| !value.is_empty())
        .unwrap_or(ALL_FILTER_VALUE)
        .to_string();
    let visibility: BTreeMap<ColumnKey, bool> = ColumnKey::ALL
        .into_iter()
        .map(|column| (column, table_state.is_column_visible(column)))
        .collect();
    let name_sort = table_state.sort_direction(ColumnKey::UnitName);

    let visible_columns = view.visible_columns.clone();
    let colspan = visible_columns.len() + 2;
    let all_page_selected = view.all_page_rows_selected;
    let header_checkbox_style = if view.some_page_rows_selected {
        "opacity: 0.6;"
    } else {
        ""
    };
    let current_page = view.current_page();
    let page_count = view.page_count;
    let selected_count = view.selected_filtered_count;
    let filtered_count = view.filtered_count;
    let can_previous = view.can_previous;
    let can_next = view.can_next;

    let mut page_size_options: Vec<usize> = PAGE_SIZE_CHOICES.to_vec();
    if !page_size_options.contains(&view.page_size) {
        page_size_options.push(view.page_size);
        page_size_options.sort_unstable();
    }
    let page_size_options: Vec<DropdownOption> = page_size_options
        .into_iter()
        .map(|size| DropdownOption::new(size.to_string(), format!("{size} / page")))
        .collect();
    let selected_page_size = view.page_size.to_string();

    let type_options = category_options(&KNOWN_UNIT_TYPES, "All types");
    let status_options = category_options(
        &UnitStatus::ALL.map(UnitStatus::as_str),
        "All statuses",
    );
    let editor_state = editor().map(|current| {
        let title = match &current.mode {
            EditorMode::Create => "Add unit".to_string(),
            EditorMode::Edit(id) => format!("Edit {id}"),
        };
        (current, title)
    });
    let details_state = details();
    let is_busy = busy();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 16px; padding: 24px; font-family: sans-serif; background: #f5f6f8; min-height: 100vh; box-sizing: border-box;",
            onclick: move |_| open_dropdown.set(None),

            div { style: "{table_container_style()}",
                div {
                    style: "display: flex; align-items: center; justify-content: space-between; gap: 12px; padding-bottom: 12px;",
                    div { style: "display: flex; align-items: center; gap: 8px;",
                        input {
                            style: "padding: 6px 10px; border: 1px solid #bbb; border-radius: 6px; min-width: 240px;",
                            placeholder: "Search units...",
                            value: "{search_value}",
                            oninput: move |event| {
                                engine.write().set_filter(ColumnKey::UnitName, event.value());
                            },
                        }
                        ColumnVisibilityDropdown {
                            id: DropdownId::ColumnVisibility,
                            visibility: visibility.clone(),
                            open_dropdown,
                            dropdown_pos,
                            on_toggle: move |column| {
                                engine.write().toggle_column_visibility(column);
                            },
                        }
                    }
                    div { style: "display: flex; gap: 8px;",
                        button {
                            style: "{button_style(true)}",
                            disabled: is_busy,
                            onclick: move |_| editor.set(Some(EditorState::create())),
                            "+ Add Unit"
                        }
                        button {
                            style: "{button_style(show_filters())}",
                            onclick: move |_| show_filters.toggle(),
                            if show_filters() { "Hide Filters" } else { "Show Filters" }
                        }
                    }
                }

                if show_filters() {
                    div {
                        style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: center; padding: 12px; margin-bottom: 12px; border: 1px solid #eee; border-radius: 8px;",
                        DropdownSelect {
                            id: DropdownId::UnitType,
                            label: "Unit Type",
                            options: type_options.clone(),
                            selected: Some(selected_type.clone()),
                            open_dropdown,
                            dropdown_pos,
                            on_select: move |value: String| {
                                engine.write().set_filter(ColumnKey::UnitType, value);
                            },
                        }
                        DropdownSelect {
                            id: DropdownId::Status,
                            label: "Status",
                            options: status_options.clone(),
                            selected: Some(selected_status.clone()),
                            open_dropdown,
                            dropdown_pos,
                            on_select: move |value: String| {
                                engine.write().set_filter(ColumnKey::Status, value);
                            },
                        }
                        input {
                            style: "padding: 6px 10px; border: 1px solid #bbb; border-radius: 6px;",
                            placeholder: "Location contains...",
                            value: "{location_value}",
                            oninput: move |event| {
                                engine.write().set_filter(ColumnKey::Location, event.value());
                            },
                        }
                        input {
                            style: "padding: 6px 10px; border: 1px solid #bbb; border-radius: 6px;",
                            placeholder: "Vehicle reg contains...",
                            value: "{reg_value}",
                            oninput: move |event| {
                                engine.write().set_filter(ColumnKey::VehicleReg, event.value());
                            },
                        }
                        button {
                            style: "{button_style(false)}",
                            onclick: move |_| {
                                engine.write().clear_filters();
                            },
                            "Clear filters"
                        }
                    }
                }

                table { style: "border-collapse: collapse; width: 100%;",
                    thead {
                        tr {
                            th { style: "{table_header_cell_style()}",
                                input {
                                    r#type: "checkbox",
                                    style: "{header_checkbox_style}",
                                    checked: all_page_selected,
                                    onclick: move |_| {
                                        engine.write().toggle_all_page_rows_selected(!all_page_selected);
                                    },
                                }
                            }
                            {visible_columns.iter().map(|column| {
                                let column = *column;
                                let header = column.header();
                                if column.is_sortable() {
                                    let arrow = match name_sort {
                                        Some(SortDirection::Asc) => "↑",
                                        Some(SortDirection::Desc) => "↓",
                                        None => "↕",
                                    };
                                    rsx!(
                                        th { style: "{table_header_cell_style()}",
                                            button {
                                                style: "border: none; background: transparent; cursor: pointer; font-weight: bold; padding: 0;",
                                                onclick: move |_| {
                                                    engine.write().toggle_sort(column);
                                                },
                                                "{header} {arrow}"
                                            }
                                        }
                                    )
                                } else {
                                    rsx!(th { style: "{table_header_cell_style()}", "{header}" })
                                }
                            })}
                            th { style: "{table_header_cell_style()}", "Actions" }
                        }
                    }
                    tbody {
                        if view.is_empty() {
                            tr {
                                td {
                                    colspan: "{colspan}",
                                    style: "height: 96px; text-align: center; color: #777;",
                                    "No results."
                                }
                            }
                        }
                        {view.rows.iter().enumerate().map(|(row_idx, row)| {
                            let unit = row.unit.clone();
                            let selected = row.selected;
                            let row_style = if selected { "background: #eef4ff;" } else { "" };
                            let toggle_id = unit.id.clone();
                            let action_unit = unit.clone();
                            let action_options = vec![
                                DropdownOption::new("copy", "Copy unit ID"),
                                DropdownOption::new("view", "View unit details"),
                                DropdownOption::new("edit", "Edit unit"),
                                DropdownOption::new("delete", "Delete unit"),
                            ];
                            rsx!(
                                tr { style: "{row_style}",
                                    td { style: "{table_cell_style()}",
                                        input {
                                            r#type: "checkbox",
                                            checked: selected,
                                            onclick: move |_| {
                                                engine.write().toggle_row_selected(&toggle_id);
                                            },
                                        }
                                    }
                                    {visible_columns.iter().map(|column| {
                                        let value = column.value(&unit).to_string();
                                        match column {
                                            ColumnKey::Status => rsx!(
                                                td { style: "{table_cell_style()}",
                                                    span { style: "{status_badge_style(unit.status)}", "{value}" }
                                                }
                                            ),
                                            ColumnKey::Id => rsx!(
                                                td { style: "{table_cell_style()} font-weight: 600;", "{value}" }
                                            ),
                                            ColumnKey::UnitType => rsx!(
                                                td { style: "{table_cell_style()} font-family: monospace; font-size: 12px;", "{value}" }
                                            ),
                                            _ => rsx!(td { style: "{table_cell_style()}", "{value}" }),
                                        }
                                    })}
                                    td { style: "{table_cell_style()}",
                                        DropdownSelect {
                                            id: DropdownId::RowActions(row_idx),
                                            label: "",
                                            options: action_options,
                                            selected: None,
                                            open_dropdown,
                                            dropdown_pos,
                                            on_select: move |action: String| on_row_action(action, action_unit.clone()),
                                        }
                                    }
                                }
                            )
                        })}
                    }
                }

                div {
                    style: "display: flex; align-items: center; justify-content: flex-end; gap: 16px; padding-top: 12px;",
                    div { style: "flex: 1; color: #777; font-size: 14px;",
                        "{selected_count} of {filtered_count} row(s) selected."
                    }
                    DropdownSelect {
                        id: DropdownId::PageSize,
                        label: "",
                        options: page_size_options,
                        selected: Some(selected_page_size),
                        open_dropdown,
                        dropdown_pos,
                        on_select: move |value: String| {
                            if let Ok(size) = value.parse::<usize>() {
                                engine.write().set_page_size(size);
                            }
                        },
                    }
                    span { style: "font-size: 14px; font-weight: 600;", "Page {current_page} of {page_count}" }
                    div { style: "display: flex; gap: 4px; align-items: center;",
                        button {
                            style: "{button_style(false)}",
                            disabled: !can_previous,
                            onclick: move |_| {
                                engine.write().previous_page();
                            },
                            "‹ Previous"
                        }
                        {view.page_items.iter().map(|item| match *item {
                            PageItem::Ellipsis => rsx!(span { style: "padding: 0 6px;", "…" }),
                            PageItem::Page(number) => rsx!(
                                button {
                                    style: "{button_style(number == current_page)}",
                                    onclick: move |_| {
                                        engine.write().set_page_index(number - 1);
                                    },
                                    "{number}"
                                }
                            ),
                        })}
                        button {
                            style: "{button_style(false)}",
                            disabled: !can_next,
                            onclick: move |_| {
                                engine.write().next_page();
                            },
                            "Next ›"
                        }
                    }
                }
            }

            if let Some((current, editor_title)) = editor_state {
                div { style: "{table_container_style()}",
                    h3 { "{editor_title}" }
                    div { style: "display: flex; flex-wrap: wrap; gap: 8px; align-items: center;",
                        input {
                            style: "padding: 6px 10px; border: 1px solid #bbb; border-radius: 6px;",
                            placeholder: "Unit name",
                            value: "{current.draft.unit_name}",
                            oninput: move |event| {
                                if let Some(state) = editor.write().as_mut() {
                                    state.draft.unit_name = event.value();
                                }
                            },
                        }
                        select {
                            style: "padding: 6px 10px; border: 1px solid #bbb; border-radius: 6px;",
                            value: "{current.draft.unit_type}",
                            onchange: move |event| {
                                if let Some(state) = editor.write().as_mut() {
                                    state.draft.unit_type = event.value();
                                }
                            },
                            for unit_type in KNOWN_UNIT_TYPES {
                                option { value: "{unit_type}", selected: current.draft.unit_type == unit_type, "{unit_type}" }
                            }
                        }
                        input {
                            style: "padding: 6px 10px; border: 1px solid #bbb; border-radius: 6px;",
                            placeholder: "Location",
                            value: "{current.draft.location}",
                            oninput: move |event| {
                                if let Some(state) = editor.write().as_mut() {
                                    state.draft.location = event.value();
                                }
                            },
                        }
                        input {
                            style: "padding: 6px 10px; border: 1px solid #bbb; border-radius: 6px;",
                            placeholder: "Vehicle reg",
                            value: "{current.draft.vehicle_reg}",
                            oninput: move |event| {
                                if let Some(state) = editor.write().as_mut() {
                                    state.draft.vehicle_reg = event.value();
                                }
                            },
                        }
                        select {
                            style: "padding: 6px 10px; border: 1px solid #bbb; border-radius: 6px;",
                            value: "{current.draft.status}",
                            onchange: move |event| {
                                if let Some(state) = editor.write().as_mut() {
                                    state.draft.status = parse_status(&event.value());
                                }
                            },
                            for status_value in UnitStatus::ALL {
                                option { value: "{status_value}", selected: current.draft.status == status_value, "{status_value}" }
                            }
                        }
                        button {
                            style: "{button_style(true)}",
                            disabled: is_busy,
                            onclick: save_editor,
                            "Save"
                        }
                        button {
                            style: "{button_style(false)}",
                            onclick: move |_| editor.set(None),
                            "Cancel"
                        }
                    }
                }
            }

            if let Some(unit) = details_state {
                div { style: "{table_container_style()}",
                    h3 { "Unit {unit.id}" }
                    dl {
                        style: "display: grid; grid-template-columns: max-content 1fr; gap: 4px 16px;",
                        for column in ColumnKey::ALL {
                            dt { style: "color: #777;", "{column.header()}" }
                            dd { style: "margin: 0;", "{column.value(&unit)}" }
                        }
                    }
                    button {
                        style: "{button_style(false)}",
                        onclick: move |_| details.set(None),
                        "Close"
                    }
                }
            }

            div { style: "display: flex; justify-content: space-between; color: #777; font-size: 13px;",
                span { "{status}" }
                span { "All rights reserved © 2025" }
            }
        }
    }
}

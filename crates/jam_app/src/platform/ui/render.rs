use jam_core::{
    AppViewModel, CollectionListView, CopyDialogView, Focus, NotificationLevel, NotificationView,
    TableView,
};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use super::constants::*;

pub fn render(frame: &mut Frame, view: &AppViewModel, last_sync: Option<&str>) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());
    let [list_area, table_area] =
        Layout::horizontal([Constraint::Length(LIST_WIDTH), Constraint::Min(20)]).areas(body);

    render_header(frame, header, view, last_sync);
    render_collections(frame, list_area, view);
    render_table(frame, table_area, view);
    render_hints(frame, footer, view);

    if let Some(menu) = &view.menu {
        let items: Vec<ListItem> = menu
            .items
            .iter()
            .map(|item| ListItem::new(format!("▸ {item}")))
            .collect();
        let rows = items.len().max(1) as u16;
        let area = Rect {
            x: table_area.right().saturating_sub(24),
            y: table_area.y + 1,
            width: 22.min(table_area.width),
            height: (rows + 2).min(table_area.height),
        };
        frame.render_widget(Clear, area);
        frame.render_widget(
            List::new(items).block(Block::bordered().title(" Actions ")),
            area,
        );
    }

    if let Some(dialog) = &view.dialog {
        render_dialog(frame, dialog);
    }
    render_notifications(frame, &view.notifications);
}

fn render_header(frame: &mut Frame, area: Rect, view: &AppViewModel, last_sync: Option<&str>) {
    let mut spans = vec![Span::styled(view.location.clone(), Style::default().fg(Color::Cyan))];
    if let Some(time) = last_sync {
        spans.push(Span::raw(format!("  synced {time}")).dim());
    }
    let header = Paragraph::new(Line::from(spans))
        .block(Block::bordered().title(format!(" {APP_TITLE} ")));
    frame.render_widget(header, area);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let block = Block::bordered().title(title);
    if focused {
        block.border_style(Style::default().fg(Color::Yellow))
    } else {
        block
    }
}

fn render_collections(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let block = pane_block(" Collections ".to_string(), view.focus == Focus::Collections);
    match &view.collections {
        CollectionListView::Loading { placeholders } => {
            let lines: Vec<Line> = (0..*placeholders)
                .map(|_| Line::from(SKELETON).dim())
                .collect();
            frame.render_widget(Paragraph::new(lines).block(block), area);
        }
        CollectionListView::Failed(message) => {
            let text = Paragraph::new(vec![
                Line::from("Failed to load collections").red(),
                Line::from(message.clone()),
            ])
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(text, area);
        }
        CollectionListView::Empty => {
            frame.render_widget(Paragraph::new("No collections").block(block), area);
        }
        CollectionListView::Items(items) => {
            let items: Vec<ListItem> = items
                .iter()
                .map(|item| {
                    let marker = if item.cursor { "> " } else { "  " };
                    let mut style = Style::default();
                    if item.selected {
                        style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
                    }
                    if item.cursor && view.focus == Focus::Collections {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    ListItem::new(format!("{marker}{}", item.name)).style(style)
                })
                .collect();
            frame.render_widget(List::new(items).block(block), area);
        }
    }
}

fn render_table(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let Some(table) = &view.table else {
        let block = pane_block(" Companies ".to_string(), false);
        frame.render_widget(
            Paragraph::new("Select a collection").dim().block(block),
            area,
        );
        return;
    };

    let title = format!(
        " {} ",
        table.collection_name.as_deref().unwrap_or(&table.collection_id)
    );
    let block = pane_block(title, view.focus == Focus::Table);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [status, grid, pager] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(Paragraph::new(status_line(table, view.ticks)), status);

    if table.rows.is_empty() {
        let text = if table.loading {
            "Loading companies..."
        } else {
            "No companies"
        };
        frame.render_widget(Paragraph::new(text).dim(), grid);
    } else {
        let rows: Vec<Row> = table
            .rows
            .iter()
            .map(|row| {
                let check = if row.checked { "[x]" } else { "[ ]" };
                let liked = if row.liked { "♥" } else { "" };
                let mut style = Style::default();
                if row.cursor && view.focus == Focus::Table {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Row::new(vec![
                    Cell::from(check),
                    Cell::from(liked).red(),
                    Cell::from(row.id.to_string()),
                    Cell::from(row.name.clone()),
                ])
                .style(style)
            })
            .collect();
        let widths = [
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Min(10),
        ];
        let grid_widget = Table::new(rows, widths).header(
            Row::new(vec!["", "Liked", "ID", "Company Name"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(grid_widget, grid);
    }

    frame.render_widget(Paragraph::new(pager_line(table)), pager);
}

fn status_line(table: &TableView, ticks: u64) -> Line<'static> {
    let mut spans = Vec::new();
    if let Some(job) = &table.job {
        let frame = SPINNER[(ticks % SPINNER.len() as u64) as usize];
        spans.push(Span::styled(
            format!("{frame} {}", job.label),
            Style::default().fg(Color::Magenta),
        ));
        spans.push(Span::raw("  "));
    }
    if table.selected_count > 0 {
        spans.push(Span::raw(format!("{} selected", table.selected_count)));
        spans.push(Span::raw("  "));
    }
    if table.show_reset {
        spans.push(Span::raw("[r] Reset").dim());
        spans.push(Span::raw("  "));
    }
    spans.push(Span::raw(format!("[m] {}", table.copy_label)).dim());
    Line::from(spans)
}

fn pager_line(table: &TableView) -> String {
    let (first, last) = if table.row_count == 0 {
        (0, 0)
    } else {
        let first = table.offset + 1;
        let last = (table.offset + table.page_size).min(table.row_count);
        (first, last)
    };
    format!(
        "Rows {first}-{last} of {} | Page {}/{} | {} per page",
        table.row_count,
        table.page_index + 1,
        table.page_count,
        table.page_size
    )
}

fn render_hints(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let hints = if view.dialog.is_some() {
        "↑/↓ choose target  Enter copy  Esc cancel"
    } else if view.menu.is_some() {
        "Enter choose  Esc close"
    } else {
        match view.focus {
            Focus::Collections => "↑/↓ move  Enter open  Tab table  R refresh  m actions  q quit",
            Focus::Table => {
                "Space select  a page  ←/→ page  s size  r reset  m actions  Tab list  q quit"
            }
        }
    };
    frame.render_widget(Paragraph::new(hints).dim(), area);
}

fn render_dialog(frame: &mut Frame, dialog: &CopyDialogView) {
    let area = frame.area();
    let height = (dialog.options.len() as u16 + 7).min(area.height);
    let width = DIALOG_WIDTH.min(area.width);
    let rect = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let mut lines = vec![Line::from(dialog.prompt), Line::from("")];
    if dialog.options.is_empty() {
        lines.push(Line::from("No other collections").dim());
    }
    for option in &dialog.options {
        let (marker, style) = if option.chosen {
            ("(•)", Style::default().fg(Color::Yellow))
        } else {
            ("( )", Style::default())
        };
        lines.push(Line::styled(format!("{marker} {}", option.label), style));
    }
    lines.push(Line::from(""));
    if dialog.pending {
        lines.push(Line::from("Copying...").italic());
    } else if let Some(error) = &dialog.error {
        lines.push(Line::from(error.clone()).red());
    }

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(format!(" {} ", dialog.title))),
        rect,
    );
}

fn render_notifications(frame: &mut Frame, notifications: &[NotificationView]) {
    let area = frame.area();
    let width = TOAST_WIDTH.min(area.width);
    let mut bottom = area.bottom().saturating_sub(1);
    for notification in notifications.iter().rev() {
        if bottom < area.y + 3 {
            break;
        }
        let rect = Rect {
            x: area.right().saturating_sub(width),
            y: bottom - 3,
            width,
            height: 3,
        };
        let color = match notification.level {
            NotificationLevel::Success => Color::Green,
            NotificationLevel::Error => Color::Red,
        };
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(notification.text.clone())
                .block(Block::bordered().border_style(Style::default().fg(color))),
            rect,
        );
        bottom -= 3;
    }
}

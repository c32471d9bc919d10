//! Draft editor renderer

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::draft_editor::{DraftEditor, Field};
use crate::tui::split_lines_preserve_trailing;
use crate::tui::theme::Theme;

const HELP_TEXT: &str =
    " [Tab] Next  [Shift+Tab] Prev  [Space] Toggle breaking  [Ctrl+S] Submit  [Esc] Cancel";

/// Render the whole editor
pub fn render(frame: &mut Frame, editor: &DraftEditor) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(2), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let header = Paragraph::new(" Review commit message ").style(Theme::header().bold());
    frame.render_widget(header, chunks[0]);

    render_form(frame, chunks[1], editor);
    render_status_bar(frame, chunks[2], editor);

    let help = Paragraph::new(HELP_TEXT).style(Theme::muted());
    frame.render_widget(help, chunks[3]);
}

fn render_form(frame: &mut Frame, area: Rect, editor: &DraftEditor) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),      // Type + Scope
            Constraint::Length(3),      // Description
            Constraint::Min(5),         // Body
            Constraint::Length(3),      // Breaking + Submit
            Constraint::Percentage(30), // Preview
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    render_text_field(frame, top[0], editor, Field::Type, " Type ", &editor.commit_type, "feat, fix, docs...");
    render_text_field(frame, top[1], editor, Field::Scope, " Scope ", &editor.scope, "optional");
    render_text_field(
        frame,
        rows[1],
        editor,
        Field::Description,
        " Description ",
        &editor.description,
        "short summary in imperative mood",
    );
    render_text_field(frame, rows[2], editor, Field::Body, " Body ", &editor.body, "optional");

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[3]);

    let breaking_indicator = if editor.breaking { "[x]" } else { "[ ]" };
    let breaking = Paragraph::new(format!(" {} Breaking change", breaking_indicator)).block(
        Block::default()
            .title(" Breaking ")
            .borders(Borders::ALL)
            .border_style(field_style(editor, Field::Breaking)),
    );
    frame.render_widget(breaking, bottom[0]);

    let submit_style = if editor.field == Field::Submit {
        Theme::submit()
    } else {
        Theme::normal()
    };
    let submit = Paragraph::new(" [ Use this message ]")
        .block(Block::default().borders(Borders::ALL).border_style(submit_style))
        .alignment(Alignment::Center);
    frame.render_widget(submit, bottom[1]);

    let preview = Paragraph::new(editor.preview())
        .block(
            Block::default()
                .title(" Preview ")
                .borders(Borders::ALL)
                .border_style(Theme::muted()),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(preview, rows[4]);
}

fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    editor: &DraftEditor,
    field: Field,
    title: &str,
    value: &str,
    placeholder: &str,
) {
    let focused = editor.field == field;
    let paragraph = if value.is_empty() && !focused {
        Paragraph::new(placeholder).style(Theme::muted())
    } else {
        Paragraph::new(value)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(field_style(editor, field));
    frame.render_widget(paragraph.block(block), area);

    if focused {
        // Cursor sits after the last character of the last line
        let lines = split_lines_preserve_trailing(value);
        let row = lines.len().saturating_sub(1) as u16;
        let col = lines.last().map(|l| l.chars().count()).unwrap_or(0) as u16;
        let inner_width = area.width.saturating_sub(2);
        let inner_height = area.height.saturating_sub(2);
        frame.set_cursor_position(Position::new(
            area.x + 1 + col.min(inner_width.saturating_sub(1)),
            area.y + 1 + row.min(inner_height.saturating_sub(1)),
        ));
    }
}

fn field_style(editor: &DraftEditor, field: Field) -> Style {
    if editor.field == field {
        Theme::focused()
    } else {
        Theme::normal()
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, editor: &DraftEditor) {
    let status = match &editor.status_message {
        Some(msg) => Paragraph::new(format!(" {}", msg)).style(Theme::error()),
        None => Paragraph::new(format!(" {}", editor.to_draft().subject_line()))
            .style(Theme::status_bar()),
    };
    frame.render_widget(status.block(Block::default().borders(Borders::TOP)), area);
}

//! Guess field and progress counter

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};

use wq_core::Progress;

use crate::input::TextField;
use crate::theme::Theme;

pub const PLACEHOLDER: &str = "Type the name of a country";

const HELP: &str = "PgUp/PgDn zoom  arrows pan  Home reset  Esc quit";

/// Widget for the top bar: guess field on the left, counter on the right
pub struct GuessBarWidget<'a> {
    field: &'a TextField,
    progress: Progress,
    theme: &'a Theme,
}

impl<'a> GuessBarWidget<'a> {
    pub fn new(field: &'a TextField, progress: Progress, theme: &'a Theme) -> Self {
        Self {
            field,
            progress,
            theme,
        }
    }
}

impl Widget for GuessBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let counter = format!(" {} ", self.progress);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(counter.chars().count() as u16),
            ])
            .split(area);

        let bg = if self.field.is_disabled() {
            self.theme.input_disabled_bg
        } else {
            self.theme.input_bg
        };
        let text = if self.field.is_empty() {
            Span::styled(
                format!(" {PLACEHOLDER}"),
                Style::default().fg(self.theme.text_dim).bg(bg),
            )
        } else {
            Span::styled(
                format!(" {}", self.field.value()),
                Style::default().fg(self.theme.input_fg).bg(bg),
            )
        };
        Paragraph::new(Line::from(text))
            .style(Style::default().bg(bg))
            .render(chunks[0], buf);

        let counter_bg = if self.progress.is_complete() {
            self.theme.region_found
        } else {
            self.theme.counter_bg
        };
        let counter_style = Style::default()
            .fg(self.theme.counter_fg)
            .bg(counter_bg)
            .add_modifier(Modifier::BOLD);
        Paragraph::new(counter)
            .style(counter_style)
            .render(chunks[1], buf);
    }
}

/// Widget for the bottom line: key help and the last clicked region
pub struct StatusWidget<'a> {
    clicked: Option<&'a str>,
    complete: bool,
    theme: &'a Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(clicked: Option<&'a str>, complete: bool, theme: &'a Theme) -> Self {
        Self {
            clicked,
            complete,
            theme,
        }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        if self.complete {
            spans.push(Span::styled(
                "All countries found! ",
                Style::default()
                    .fg(self.theme.border_accent)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        if let Some(name) = self.clicked {
            spans.push(Span::styled(
                format!("Clicked: {name}  "),
                Style::default().fg(self.theme.clicked),
            ));
        }
        spans.push(Span::styled(HELP, Style::default().fg(self.theme.text_dim)));

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_placeholder_when_empty() {
        let theme = Theme::dark();
        let field = TextField::default();
        let area = Rect::new(0, 0, 50, 1);
        let mut buf = Buffer::empty(area);
        GuessBarWidget::new(&field, Progress { found: 0, total: 5 }, &theme).render(area, &mut buf);

        let text = row_text(&buf, 0);
        assert!(text.contains(PLACEHOLDER));
        assert!(text.trim_end().ends_with("0 / 5"));
    }

    #[test]
    fn test_field_value_and_disabled_background() {
        let theme = Theme::dark();
        let mut field = TextField::default();
        field.push_str("fra");
        field.disable();
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        GuessBarWidget::new(&field, Progress { found: 5, total: 5 }, &theme).render(area, &mut buf);

        assert!(row_text(&buf, 0).contains(" fra"));
        assert_eq!(buf[(0, 0)].bg, theme.input_disabled_bg);
        assert_eq!(buf[(39, 0)].bg, theme.region_found);
    }

    #[test]
    fn test_status_shows_clicked_region() {
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        StatusWidget::new(Some("France"), false, &theme).render(area, &mut buf);
        assert!(row_text(&buf, 0).starts_with("Clicked: France"));
    }
}

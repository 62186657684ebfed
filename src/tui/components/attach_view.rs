use color_eyre::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::core::format;
use crate::core::heatmap;
use crate::core::metrics::AttachData;
use crate::tui::action::Action;
use crate::tui::chart;
use crate::tui::component::{Component, Focusable};
use crate::tui::theme::Theme;

/// Product-attach analysis: stat cards, the pair-frequency heatmap with a
/// movable cell cursor, the top add-on products, and the attach-rate trend.
pub struct AttachView {
    data: AttachData,
    products: Vec<String>,
    cursor: (usize, usize), // (row, col) into the product grid
    focused: bool,
    supported_actions: Vec<Action>,
}

impl AttachView {
    pub fn new(data: AttachData) -> Self {
        let products = heatmap::product_names(&data.heatmap);
        Self {
            data,
            products,
            cursor: (0, 0),
            focused: false,
            supported_actions: vec![
                Action::MoveUp,
                Action::MoveDown,
                Action::MoveLeft,
                Action::MoveRight,
            ],
        }
    }

    /// The pair under the heatmap cursor and its looked-up frequency
    pub fn cursor_pair(&self) -> Option<(&str, &str, f64)> {
        let a = self.products.get(self.cursor.0)?;
        let b = self.products.get(self.cursor.1)?;
        Some((a, b, heatmap::frequency(&self.data.heatmap, a, b)))
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        if self.products.is_empty() {
            return;
        }
        let len = self.products.len() as isize;
        self.cursor.0 = (self.cursor.0 as isize + d_row).clamp(0, len - 1) as usize;
        self.cursor.1 = (self.cursor.1 as isize + d_col).clamp(0, len - 1) as usize;
    }

    /// Short grid label: the first word of the product name
    fn short(name: &str) -> &str {
        name.split_whitespace().next().unwrap_or(name)
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let cards = [
            ("Attach Rate", format::pct1(self.data.attach_rate)),
            ("Top Products", self.data.top_products.len().to_string()),
            ("Common Combos", self.data.common_combos.len().to_string()),
        ];
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(area);
        for (i, (label, value)) in cards.into_iter().enumerate() {
            let card = Paragraph::new(Line::from(Span::styled(
                value,
                theme.normal_style().add_modifier(Modifier::BOLD),
            )))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(label)
                    .border_style(theme.border_style()),
            );
            frame.render_widget(card, columns[i]);
        }
    }

    fn render_heatmap(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Product Attach Heatmap (%)")
            .border_style(if self.focused {
                theme.focused_border_style()
            } else {
                theme.border_style()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 3 || self.products.is_empty() {
            return;
        }

        let label_w: usize = 11;
        let cell_w: usize = 5;

        let mut lines: Vec<Line> = Vec::new();

        // Column header row
        let mut header = vec![Span::raw(" ".repeat(label_w))];
        for (col, product) in self.products.iter().enumerate() {
            let text = format!("{:^cell_w$}", truncate(Self::short(product), cell_w - 1));
            let style = if self.focused && col == self.cursor.1 {
                theme.header_style()
            } else {
                theme.muted_style()
            };
            header.push(Span::styled(text, style));
        }
        lines.push(Line::from(header));

        for (row, row_product) in self.products.iter().enumerate() {
            let label_style = if self.focused && row == self.cursor.0 {
                theme.header_style()
            } else {
                theme.muted_style()
            };
            let mut spans = vec![Span::styled(
                format!("{:>label_w$}", truncate(Self::short(row_product), label_w - 1)),
                label_style,
            )];
            for (col, col_product) in self.products.iter().enumerate() {
                let diagonal = row_product == col_product;
                let frequency = heatmap::frequency(&self.data.heatmap, row_product, col_product);
                let intensity = heatmap::intensity(&self.data.heatmap, row_product, col_product);

                let text = if diagonal || frequency <= 0.0 {
                    " ".repeat(cell_w)
                } else {
                    format!("{:^cell_w$}", format!("{frequency:.0}"))
                };
                let mut style = if diagonal {
                    Style::default().bg(theme.heat_neutral)
                } else {
                    let fg = if intensity > 0.5 {
                        Color::White
                    } else {
                        theme.foreground
                    };
                    Style::default().bg(theme.heat_color(intensity)).fg(fg)
                };
                if self.focused && (row, col) == self.cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(text, style));
            }
            lines.push(Line::from(spans));
        }

        // Footer: the looked-up pair under the cursor
        if let Some((a, b, frequency)) = self.cursor_pair() {
            let text = if a == b {
                "—".to_string()
            } else {
                format!("{a} + {b}: {}", format::pct1(frequency))
            };
            lines.push(Line::from(Span::styled(text, theme.info_style())));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_top_products(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Top Add-on Products")
            .border_style(theme.border_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = self
            .data
            .top_products
            .iter()
            .enumerate()
            .map(|(i, product)| {
                Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), theme.muted_style()),
                    Span::styled(
                        format!("{:<26}", product.name),
                        theme.normal_style().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{:>7} attach  ", format::pct1(product.rate)),
                        theme.normal_style(),
                    ),
                    Span::styled(format::currency_m(product.revenue), theme.success_style()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for AttachView {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::MoveUp => {
                self.move_cursor(-1, 0);
                Ok(true)
            }
            Action::MoveDown => {
                self.move_cursor(1, 0);
                Ok(true)
            }
            Action::MoveLeft => {
                self.move_cursor(0, -1);
                Ok(true)
            }
            Action::MoveRight => {
                self.move_cursor(0, 1);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(9),
                Constraint::Length(9),
            ])
            .split(area);

        self.render_stats(frame, rows[0], theme);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1]);
        self.render_heatmap(frame, middle[0], theme);
        self.render_top_products(frame, middle[1], theme);

        let trend_block = Block::default()
            .borders(Borders::ALL)
            .title("Attach Rate Trend")
            .border_style(theme.border_style());
        chart::render_rate_trend(frame, rows[2], theme, trend_block, &self.data.trend);
    }

    fn supported_actions(&self) -> &[Action] {
        &self.supported_actions
    }

    fn name(&self) -> &str {
        "AttachView"
    }
}

impl Focusable for AttachView {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

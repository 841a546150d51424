use crate::components::banner_frames::{
    BannerColor, BannerTheme, bounce_row, domino_frame, resolve, tagline, title_rows,
};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Style;
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Widget};

pub use crate::components::banner_frames::FRAME_COUNT;

/// Start-up splash: the title art flanked by two tumbling domino tiles.
pub struct AnimatedBanner {
    pub frame: usize,
    pub tick: u64,
    pub theme: BannerTheme,
}

impl Default for AnimatedBanner {
    fn default() -> Self {
        Self { frame: 0, tick: 0, theme: BannerTheme::Dark }
    }
}

impl Widget for AnimatedBanner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 3 {
            render_line(
                Line::from(" QUANTUM DOMINO "),
                area.x,
                area.y,
                area.width,
                buf,
            );
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(resolve(BannerColor::Primary, self.theme));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if inner.width < 110 {
            render_compact(&self, inner, buf);
            return;
        }
        render_full(&self, inner, buf);
    }
}

fn render_compact(banner: &AnimatedBanner, inner: Rect, buf: &mut Buffer) {
    render_centered(
        Line::from(Span::styled(
            "QUANTUM DOMINO",
            resolve(BannerColor::Accent, banner.theme),
        )),
        inner,
        inner.y,
        buf,
    );
    if inner.height > 1 {
        render_centered(
            Line::from(Span::styled(
                tagline(env!("CARGO_PKG_VERSION")),
                resolve(BannerColor::Secondary, banner.theme),
            )),
            inner,
            inner.y + 1,
            buf,
        );
    }
}

fn render_full(banner: &AnimatedBanner, inner: Rect, buf: &mut Buffer) {
    let title = title_rows();
    let left_tile = domino_frame(banner.frame);
    let right_tile = domino_frame((banner.frame + 2) % FRAME_COUNT);
    let lit_row = bounce_row(banner.tick, 5);

    for row in 0..5u16 {
        if row >= inner.height {
            break;
        }
        let y = inner.y + row;
        let tile_style = if row == lit_row {
            resolve(BannerColor::Secondary, banner.theme)
        } else {
            resolve(BannerColor::Shadow, banner.theme)
        };
        let title_row = title.get(row as usize).copied().unwrap_or("");
        let padded = format!("{title_row:<width$}", width = title[0].len());

        render_centered(
            Line::from(vec![
                Span::styled(left_tile[row as usize].to_string(), tile_style),
                Span::raw("  "),
                Span::styled(padded, resolve(BannerColor::Primary, banner.theme)),
                Span::raw("  "),
                Span::styled(right_tile[row as usize].to_string(), tile_style),
            ]),
            inner,
            y,
            buf,
        );
    }

    if inner.height > 6 {
        render_centered(
            Line::from(Span::styled(
                format!(" {} ", tagline(env!("CARGO_PKG_VERSION"))),
                resolve(BannerColor::Accent, banner.theme),
            )),
            inner,
            inner.y + 6,
            buf,
        );
    }
}

fn render_centered(line: Line, area: Rect, y: u16, buf: &mut Buffer) {
    if y >= area.y + area.height {
        return;
    }
    let w = line.width() as u16;
    let x = area.x + area.width.saturating_sub(w) / 2;
    render_line(line, x, y, area.width, buf);
}

fn render_line(line: Line, x: u16, y: u16, max_width: u16, buf: &mut Buffer) {
    let mut cx = x;
    let limit = x.saturating_add(max_width);
    for span in &line.spans {
        let text = span.content.as_ref();
        let style: Style = span.style;
        let mut run = String::new();
        for ch in text.chars() {
            if cx >= limit {
                break;
            }
            run.push(ch);
            cx += 1;
        }
        let start = cx.saturating_sub(run.chars().count() as u16);
        if !run.is_empty() {
            buf.set_string(start, y, run, style);
        }
    }
}

use domino_api::Team;
use tui::style::{Color, Modifier, Style};

pub const FRAME_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BannerColor {
    Primary,
    Secondary,
    Accent,
    Shadow,
    Dim,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum BannerTheme {
    #[default]
    Dark,
}

pub fn resolve(color: BannerColor, _theme: BannerTheme) -> Style {
    match color {
        BannerColor::Primary => Style::default().fg(Color::Rgb(6, 182, 212)),
        BannerColor::Secondary => Style::default().fg(Color::Rgb(236, 72, 153)),
        BannerColor::Accent => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        BannerColor::Shadow | BannerColor::Dim => Style::default().fg(Color::Indexed(240)),
    }
}

/// Cyan for team A, magenta for team B.
pub fn team_color(team: Team) -> Color {
    match team {
        Team::A => Color::Rgb(6, 182, 212),
        Team::B => Color::Rgb(236, 72, 153),
    }
}

/// Row (0..height) of a bouncing highlight, a triangle wave over `tick`.
pub fn bounce_row(tick: u64, height: u16) -> u16 {
    if height == 0 {
        return 0;
    }
    let h = u64::from(height.saturating_sub(1));
    if h == 0 {
        return 0;
    }
    let period = 2 * h;
    let t = tick % period;
    (h.abs_diff(t)) as u16
}

pub fn domino_frame(frame: usize) -> [&'static str; 5] {
    const FRAMES: [[&str; 5]; FRAME_COUNT] = [
        [".-----.", "| o   |", "|-----|", "|   o |", "'-----'"],
        [".-----.", "| o o |", "|-----|", "|  o  |", "'-----'"],
        [".-----.", "|o o o|", "|-----|", "| o o |", "'-----'"],
        [".-----.", "|  o  |", "|-----|", "|o o o|", "'-----'"],
    ];
    FRAMES[frame % FRAME_COUNT]
}

pub fn title_rows() -> [&'static str; 4] {
    [
        "  ___   _   _    _    _  _  _____  _   _  __  __    ___    ___   __  __  ___  _  _   ___  ",
        " / _ \\ | | | |  /_\\  | \\| ||_   _|| | | ||  \\/  |  |   \\  / _ \\ |  \\/  ||_ _|| \\| | / _ \\ ",
        "| (_) || |_| | / _ \\ | .` |  | |  | |_| || |\\/| |  | |) || (_) || |\\/| | | | | .` || (_) |",
        " \\__\\_\\ \\___/ /_/ \\_\\|_|\\_|  |_|   \\___/ |_|  |_|  |___/  \\___/ |_|  |_||___||_|\\_| \\___/ ",
    ]
}

pub fn tagline(version: &str) -> String {
    format!("ORBITAL SYSTEM ACTIVE // v{version}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounce_row_reflects_at_the_edges() {
        let rows: Vec<u16> = (0..10).map(|t| bounce_row(t, 5)).collect();
        assert_eq!(rows, vec![4, 3, 2, 1, 0, 1, 2, 3, 4, 3]);
        assert_eq!(bounce_row(7, 1), 0);
    }

    #[test]
    fn title_rows_share_one_width() {
        let widths: Vec<usize> = title_rows().iter().map(|r| r.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn domino_frames_wrap() {
        assert_eq!(domino_frame(FRAME_COUNT + 1), domino_frame(1));
    }
}

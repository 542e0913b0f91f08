//! UI 主题：把颜色集中管理，避免散落在渲染代码里。
//!
//! 亮色与暗色两套调色板在启动时按终端能力降级一次，渲染时按 `dark_mode` 取用。

use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct UiTheme {
    pub background: Color,
    pub foreground: Color,
    pub muted_fg: Color,
    pub focus_border: Color,
    pub inactive_border: Color,
    pub accent_fg: Color,
    pub selection_bg: Color,
    pub link_fg: Color,
    pub code_fg: Color,
    pub completed_fg: Color,
    pub error_fg: Color,
    pub gauge_fg: Color,
    pub gauge_bg: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColorSupport {
    TrueColor,
    Ansi256,
    Ansi16,
}

/// 读取 `NOVELPAD_COLOR_SUPPORT` 覆盖值，否则按 `COLORTERM` / `TERM` 推断。
pub fn detect_terminal_color_support() -> TerminalColorSupport {
    let var = |name: &str| std::env::var(name).unwrap_or_default();
    color_support_from(&var("NOVELPAD_COLOR_SUPPORT"), &var("COLORTERM"), &var("TERM"))
}

pub(crate) fn color_support_from(
    forced: &str,
    colorterm: &str,
    term: &str,
) -> TerminalColorSupport {
    match forced.trim().to_ascii_lowercase().as_str() {
        "truecolor" | "24bit" | "rgb" => return TerminalColorSupport::TrueColor,
        "256" | "ansi256" => return TerminalColorSupport::Ansi256,
        "16" | "ansi16" | "basic" => return TerminalColorSupport::Ansi16,
        _ => {}
    }

    let colorterm = colorterm.to_ascii_lowercase();
    let term = term.to_ascii_lowercase();
    let direct = ["truecolor", "24bit", "direct"];
    if direct
        .iter()
        .any(|hint| colorterm.contains(hint) || term.contains(hint))
    {
        TerminalColorSupport::TrueColor
    } else if term.contains("256color") {
        TerminalColorSupport::Ansi256
    } else {
        TerminalColorSupport::Ansi16
    }
}

impl Default for UiTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl UiTheme {
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(0xFA, 0xFA, 0xF7),
            foreground: Color::Rgb(0x1F, 0x29, 0x37),
            muted_fg: Color::Rgb(0x6B, 0x72, 0x80),
            focus_border: Color::Rgb(0x25, 0x63, 0xEB),
            inactive_border: Color::Rgb(0xD1, 0xD5, 0xDB),
            accent_fg: Color::Rgb(0x1D, 0x4E, 0xD8),
            selection_bg: Color::Rgb(0xBF, 0xDB, 0xFE),
            link_fg: Color::Rgb(0x25, 0x63, 0xEB),
            code_fg: Color::Rgb(0x9D, 0x17, 0x4D),
            completed_fg: Color::Rgb(0x15, 0x80, 0x3D),
            error_fg: Color::Rgb(0xB9, 0x1C, 0x1C),
            gauge_fg: Color::Rgb(0x25, 0x63, 0xEB),
            gauge_bg: Color::Rgb(0xE5, 0xE7, 0xEB),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(0x11, 0x18, 0x27),
            foreground: Color::Rgb(0xE5, 0xE7, 0xEB),
            muted_fg: Color::Rgb(0x9C, 0xA3, 0xAF),
            focus_border: Color::Rgb(0x60, 0xA5, 0xFA),
            inactive_border: Color::Rgb(0x37, 0x41, 0x51),
            accent_fg: Color::Rgb(0x93, 0xC5, 0xFD),
            selection_bg: Color::Rgb(0x1E, 0x3A, 0x8A),
            link_fg: Color::Rgb(0x60, 0xA5, 0xFA),
            code_fg: Color::Rgb(0xF4, 0x72, 0xB6),
            completed_fg: Color::Rgb(0x4A, 0xDE, 0x80),
            error_fg: Color::Rgb(0xF8, 0x71, 0x71),
            gauge_fg: Color::Rgb(0x60, 0xA5, 0xFA),
            gauge_bg: Color::Rgb(0x1F, 0x29, 0x37),
        }
    }

    pub fn adapt_to_terminal_capabilities(&mut self) {
        self.apply_color_support(detect_terminal_color_support());
    }

    fn apply_color_support(&mut self, support: TerminalColorSupport) {
        if support == TerminalColorSupport::TrueColor {
            return;
        }

        for color in [
            &mut self.background,
            &mut self.foreground,
            &mut self.muted_fg,
            &mut self.focus_border,
            &mut self.inactive_border,
            &mut self.accent_fg,
            &mut self.selection_bg,
            &mut self.link_fg,
            &mut self.code_fg,
            &mut self.completed_fg,
            &mut self.error_fg,
            &mut self.gauge_fg,
            &mut self.gauge_bg,
        ] {
            *color = map_color_for_support(*color, support);
        }
    }
}

/// 亮/暗两套调色板，启动时按终端能力降级一次。
#[derive(Debug, Clone)]
pub struct ThemePair {
    light: UiTheme,
    dark: UiTheme,
}

impl Default for ThemePair {
    fn default() -> Self {
        Self {
            light: UiTheme::light(),
            dark: UiTheme::dark(),
        }
    }
}

impl ThemePair {
    pub fn detect() -> Self {
        let mut themes = Self::default();
        themes.light.adapt_to_terminal_capabilities();
        themes.dark.adapt_to_terminal_capabilities();
        themes
    }

    pub fn get(&self, dark_mode: bool) -> &UiTheme {
        if dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }
}

pub(crate) fn map_color_for_support(color: Color, support: TerminalColorSupport) -> Color {
    let rgb = match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Indexed(index) if index > 15 => palette_rgb(index),
        other => return other,
    };
    match support {
        TerminalColorSupport::TrueColor => color,
        TerminalColorSupport::Ansi256 if matches!(color, Color::Indexed(_)) => color,
        TerminalColorSupport::Ansi256 => Color::Indexed(nearest_index(rgb, 0..=255)),
        TerminalColorSupport::Ansi16 => Color::Indexed(nearest_index(rgb, 0..=15)),
    }
}

/// `candidates` 中与 `rgb` 平方距离最近的调色板索引。
fn nearest_index(rgb: (u8, u8, u8), candidates: std::ops::RangeInclusive<u8>) -> u8 {
    let distance = |index: &u8| {
        let (r, g, b) = palette_rgb(*index);
        let d = |x: u8, y: u8| (i32::from(x) - i32::from(y)).pow(2);
        d(rgb.0, r) + d(rgb.1, g) + d(rgb.2, b)
    };
    candidates.min_by_key(distance).unwrap_or(0)
}

/// xterm 的 256 色调色板取值。
fn palette_rgb(index: u8) -> (u8, u8, u8) {
    const CUBE: [u8; 6] = [0, 95, 135, 175, 215, 255];
    match index {
        0..=15 => ANSI16_RGB[usize::from(index)],
        16..=231 => {
            let cube = usize::from(index - 16);
            (CUBE[cube / 36], CUBE[cube / 6 % 6], CUBE[cube % 6])
        }
        _ => {
            let gray = 8 + (index - 232) * 10;
            (gray, gray, gray)
        }
    }
}

const ANSI16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

/// 解析高亮可能携带的 css 颜色：`#rgb`、`#rrggbb` 和基础颜色名。
pub fn parse_color(value: &str) -> Option<Color> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    if let Some(hex) = v.strip_prefix('#') {
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };
        let r = u8::from_str_radix(expanded.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(expanded.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(expanded.get(4..6)?, 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    let v = v.to_ascii_lowercase();
    let c = match v.as_str() {
        "black" => Color::Indexed(0),
        "red" => Color::Indexed(1),
        "green" => Color::Indexed(2),
        "yellow" => Color::Indexed(3),
        "blue" => Color::Indexed(4),
        "magenta" | "fuchsia" => Color::Indexed(5),
        "cyan" | "aqua" => Color::Indexed(6),
        "gray" | "grey" => Color::Indexed(7),
        "white" => Color::Indexed(15),
        "orange" => Color::Rgb(0xFF, 0xA5, 0x00),
        "pink" => Color::Rgb(0xFF, 0xC0, 0xCB),
        _ => return None,
    };

    Some(c)
}

/// 在 `bg` 上取黑或白中更易读的前景色。
pub fn contrast_fg(bg: Color) -> Color {
    match bg {
        Color::Rgb(r, g, b) => {
            let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
            if luma > 128_000 {
                Color::Rgb(0, 0, 0)
            } else {
                Color::Rgb(0xFF, 0xFF, 0xFF)
            }
        }
        _ => Color::Indexed(0),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/theme.rs"]
mod tests;

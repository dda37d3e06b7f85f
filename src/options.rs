use clap::ValueEnum;
use crossterm::style::Color;

pub struct Theme {
    pub bg_piece: Color,
    pub bg_empty: Color,
    pub bg_selected: Color,
    pub bg_illegal: Color,
    pub text: Color,
    pub placed: Color,
    pub status: Color,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeChoice {
    Frappe,
    HighContrast,
    BlackAndWhite,
}

impl ThemeChoice {
    pub fn theme(self) -> Theme {
        match self {
            Self::Frappe => Theme {
                bg_piece: Color::Rgb { r: 98, g: 104, b: 128 },
                bg_empty: Color::Rgb { r: 48, g: 52, b: 70 },
                bg_selected: Color::Rgb { r: 202, g: 158, b: 230 },
                bg_illegal: Color::Rgb { r: 231, g: 130, b: 132 },
                text: Color::Rgb { r: 198, g: 208, b: 245 },
                placed: Color::Rgb { r: 166, g: 209, b: 137 },
                status: Color::Rgb { r: 229, g: 200, b: 144 },
            },
            Self::HighContrast => Theme {
                bg_piece: Color::Rgb { r: 60, g: 60, b: 60 },
                bg_empty: Color::Rgb { r: 0, g: 0, b: 0 },
                bg_selected: Color::Rgb { r: 0, g: 128, b: 255 },
                bg_illegal: Color::Rgb { r: 255, g: 60, b: 60 },
                text: Color::Rgb { r: 230, g: 230, b: 192 },
                placed: Color::Rgb { r: 0, g: 255, b: 0 },
                status: Color::Rgb { r: 250, g: 240, b: 50 },
            },
            Self::BlackAndWhite => Theme {
                bg_piece: Color::AnsiValue(145),
                bg_empty: Color::Grey,
                bg_selected: Color::White,
                bg_illegal: Color::DarkGrey,
                text: Color::Black,
                placed: Color::Black,
                status: Color::Reset,
            },
        }
    }
}

pub struct IconSet {
    /// Indexed by orientation; a quarter turn is clockwise on screen.
    pub arrows: [char; 4],
    pub empty: char,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum IconSetChoice {
    Ascii,
    Unicode,
}

impl IconSetChoice {
    pub fn iconset(self) -> IconSet {
        match self {
            Self::Ascii => IconSet {
                arrows: ['^', '>', 'v', '<'],
                empty: '.',
            },
            Self::Unicode => IconSet {
                arrows: ['↑', '→', '↓', '←'],
                empty: '·',
            },
        }
    }
}

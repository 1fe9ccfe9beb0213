//! The page the viewer draws on.
//!
//! A page is a fixed set of display regions plus a stack of error banners.
//! The viewer only talks to the [`Surface`] trait, so anything that can hold
//! region contents (the in-memory [`Page`], a recorder in tests) can be
//! rendered into.

use std::collections::HashMap;

use crate::types::{DrawNumber, PrizeRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    TelekinoNumbers,
    RekinoNumbers,
    DrawNumber,
    DrawDate,
    Prizes,
    AvailableDraws,
    LastUpdate,
}

impl Region {
    /// Element id used in the HTML export.
    pub fn id(self) -> &'static str {
        match self {
            Region::TelekinoNumbers => "telekino-numbers",
            Region::RekinoNumbers => "rekino-numbers",
            Region::DrawNumber => "draw-number",
            Region::DrawDate => "draw-date",
            Region::Prizes => "prizes",
            Region::AvailableDraws => "available-draws",
            Region::LastUpdate => "last-update",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Telekino,
    Rekino,
}

impl Pool {
    pub fn label(self) -> &'static str {
        match self {
            Pool::Telekino => "Telekino",
            Pool::Rekino => "Rekino",
        }
    }

    pub fn region(self) -> Region {
        match self {
            Pool::Telekino => Region::TelekinoNumbers,
            Pool::Rekino => Region::RekinoNumbers,
        }
    }
}

/// Transient or empty states shown in place of a number list.
#[derive(Debug, Clone, PartialEq)]
pub enum Placeholder {
    Loading(Pool),
    NoNumbers(Pool),
    MissingDraw(DrawNumber),
}

impl Placeholder {
    pub fn message(&self) -> String {
        match self {
            Placeholder::Loading(pool) => format!("Cargando números {}...", pool.label()),
            Placeholder::NoNumbers(pool) => {
                format!("No hay números de {} disponibles", pool.label())
            }
            Placeholder::MissingDraw(number) => {
                format!("No hay datos disponibles para el sorteo {}", number)
            }
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Placeholder::MissingDraw(_) => {
                Some("El scraper no pudo obtener los números de este sorteo histórico")
            }
            _ => None,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Placeholder::Loading(_) => "loading",
            Placeholder::NoNumbers(_) | Placeholder::MissingDraw(_) => "no-data",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Zero-padded numbers of one pool.
    Numbers { pool: Pool, values: Vec<String> },
    Placeholder(Placeholder),
    Text(String),
    Prizes(Vec<PrizeRow>),
    /// Selector options. Empty means there is nothing to choose from.
    Options(Vec<SelectOption>),
}

pub trait Surface {
    /// Replaces whatever the region currently shows.
    fn write(&mut self, region: Region, content: Content);

    /// Puts an error banner above everything already on the page.
    fn prepend_error(&mut self, message: &str);
}

#[derive(Debug, Default, Clone)]
pub struct Page {
    regions: HashMap<Region, Content>,
    errors: Vec<String>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, region: Region) -> Option<&Content> {
        self.regions.get(&region)
    }

    pub fn text(&self, region: Region) -> Option<&str> {
        match self.regions.get(&region) {
            Some(Content::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Banners, top first.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn numbers(&self, pool: Pool) -> &[String] {
        match self.regions.get(&pool.region()) {
            Some(Content::Numbers { values, .. }) => values.as_slice(),
            _ => &[],
        }
    }

    pub fn placeholder(&self, region: Region) -> Option<&Placeholder> {
        match self.regions.get(&region) {
            Some(Content::Placeholder(placeholder)) => Some(placeholder),
            _ => None,
        }
    }

    /// Number elements currently on the page, across both pools.
    pub fn number_count(&self) -> usize {
        self.numbers(Pool::Telekino).len() + self.numbers(Pool::Rekino).len()
    }
}

impl Surface for Page {
    fn write(&mut self, region: Region, content: Content) {
        self.regions.insert(region, content);
    }

    fn prepend_error(&mut self, message: &str) {
        self.errors.insert(0, message.to_string());
    }
}

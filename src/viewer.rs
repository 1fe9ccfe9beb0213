use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::api::DataSource;
use crate::collection::DrawData;
use crate::error::LoadError;
use crate::page::{Content, Placeholder, Pool, Region, SelectOption, Surface};
use crate::types::{AvailableDraw, DrawNumber, DrawRecord, ResultsDocument};
use crate::utils::{format_date, pad_number};

pub const LOAD_ERROR_MESSAGE: &str = "Error cargando los resultados. Ejecuta el scraper primero.";
pub const NO_CURRENT_DRAW_MESSAGE: &str =
    "No hay datos del sorteo actual. Ejecuta el scraper primero.";
pub const NO_DATE_TEXT: &str = "Fecha no disponible";
pub const NO_DRAW_NUMBER_TEXT: &str = "Sorteo no disponible";
pub const DEFAULT_SELECT_DELAY: Duration = Duration::from_millis(300);

/// Page controller: owns the loaded draws, the selected draw and the surface
/// it renders into.
pub struct DrawViewer<S> {
    surface: S,
    data: Option<DrawData>,
    selected: Option<DrawNumber>,
    select_delay: Duration,
}

impl<S: Surface> DrawViewer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            data: None,
            selected: None,
            select_delay: DEFAULT_SELECT_DELAY,
        }
    }

    /// Pause between showing the loading placeholders and the selected draw.
    pub fn with_select_delay(mut self, delay: Duration) -> Self {
        self.select_delay = delay;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn data(&self) -> Option<&DrawData> {
        self.data.as_ref()
    }

    pub fn selected(&self) -> Option<&DrawNumber> {
        self.selected.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// Loads the results document and renders the current draw.
    ///
    /// On failure a single error banner is shown, nothing else is rendered,
    /// and the error is handed back so the caller can skip the selection loop.
    pub async fn initialize(&mut self, source: &DataSource) -> Result<(), LoadError> {
        self.initialize_with(source, &reqwest::Client::new()).await
    }

    /// [`DrawViewer::initialize`] with a caller-provided HTTP client.
    pub async fn initialize_with(
        &mut self,
        source: &DataSource,
        client: &reqwest::Client,
    ) -> Result<(), LoadError> {
        info!(source = %source, "loading draw results");

        match source.load_with(client).await {
            Ok(document) => {
                self.present(document);
                Ok(())
            }
            Err(e) => {
                error!(source = %source, error = %e, "error loading draw results");
                self.surface.prepend_error(LOAD_ERROR_MESSAGE);
                Err(e)
            }
        }
    }

    /// Takes an already decoded document: builds the draw collection, fills
    /// the selector and renders the current draw.
    pub fn present(&mut self, document: ResultsDocument) {
        let data = DrawData::from(document);
        info!(
            draws = data.collection.len(),
            available = data.available.len(),
            total_scraped = ?data.total_draws_scraped,
            source_url = ?data.source_url,
            "draw results loaded"
        );
        debug!(numbers = ?data.collection.numbers().collect::<Vec<_>>(), "draws in collection");

        if let Some(scraped_at) = &data.scraped_at {
            self.surface
                .write(Region::LastUpdate, Content::Text(scraped_at.clone()));
        }

        write_available_draws(&mut self.surface, &data.available, data.current_number());

        match &data.current {
            Some(current) => {
                write_draw(&mut self.surface, current);
                self.selected = current.number.clone();
            }
            None => {
                warn!("results document has no current draw");
                self.surface.prepend_error(NO_CURRENT_DRAW_MESSAGE);
            }
        }

        self.data = Some(data);
    }

    pub fn render_draw(&mut self, record: &DrawRecord) {
        write_draw(&mut self.surface, record);
    }

    /// Switches to another draw. Loading placeholders go out before the
    /// delay, the draw (or the missing-draw placeholders) after it.
    pub async fn select_draw(&mut self, number: &str) {
        let number = number.trim();
        if number.is_empty() {
            return;
        }
        info!(draw = number, "draw selected");

        for pool in [Pool::Telekino, Pool::Rekino] {
            self.surface.write(
                pool.region(),
                Content::Placeholder(Placeholder::Loading(pool)),
            );
        }

        if !self.select_delay.is_zero() {
            tokio::time::sleep(self.select_delay).await;
        }

        match self.data.as_ref().and_then(|data| data.collection.get(number)) {
            Some(record) => {
                debug!(draw = number, "draw found");
                write_draw(&mut self.surface, record);
            }
            None => {
                warn!(draw = number, "no data for draw");
                write_missing_draw(&mut self.surface, &DrawNumber::from(number));
            }
        }

        self.selected = Some(DrawNumber::from(number));
    }
}

fn write_draw<S: Surface>(surface: &mut S, record: &DrawRecord) {
    write_numbers(surface, Pool::Telekino, record.telekino_numbers());
    write_numbers(surface, Pool::Rekino, record.rekino_numbers());

    let label = match &record.number {
        Some(number) => format!("Sorteo #{}", number),
        None => NO_DRAW_NUMBER_TEXT.to_string(),
    };
    surface.write(Region::DrawNumber, Content::Text(label));

    let date = match &record.date {
        Some(date) => format_date(date),
        None => NO_DATE_TEXT.to_string(),
    };
    surface.write(Region::DrawDate, Content::Text(date));

    if record.has_prizes() {
        debug!(prizes = ?record.prizes, "prizes available");
    }
    if let Some(note) = &record.note {
        debug!(note = %note, "draw note");
    }
    surface.write(Region::Prizes, Content::Prizes(record.prize_rows()));
}

fn write_numbers<S: Surface>(surface: &mut S, pool: Pool, numbers: &[u32]) {
    let content = if numbers.is_empty() {
        Content::Placeholder(Placeholder::NoNumbers(pool))
    } else {
        Content::Numbers {
            pool,
            values: numbers.iter().copied().map(pad_number).collect(),
        }
    };
    surface.write(pool.region(), content);
}

fn write_missing_draw<S: Surface>(surface: &mut S, number: &DrawNumber) {
    for pool in [Pool::Telekino, Pool::Rekino] {
        surface.write(
            pool.region(),
            Content::Placeholder(Placeholder::MissingDraw(number.clone())),
        );
    }
    surface.write(
        Region::DrawNumber,
        Content::Text(format!("Sorteo #{}", number)),
    );
    surface.write(Region::DrawDate, Content::Text(NO_DATE_TEXT.to_string()));
    surface.write(Region::Prizes, Content::Prizes(Vec::new()));
}

fn write_available_draws<S: Surface>(
    surface: &mut S,
    available: &[AvailableDraw],
    current: Option<&DrawNumber>,
) {
    let options = available
        .iter()
        .map(|draw| SelectOption {
            value: draw.number.to_string(),
            label: draw.label(),
            selected: current == Some(&draw.number),
        })
        .collect();
    surface.write(Region::AvailableDraws, Content::Options(options));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Keeps every write in order so tests can check sequencing.
    #[derive(Default)]
    struct Recorder {
        writes: Vec<(Region, Content)>,
        errors: Vec<String>,
    }

    impl Surface for Recorder {
        fn write(&mut self, region: Region, content: Content) {
            self.writes.push((region, content));
        }

        fn prepend_error(&mut self, message: &str) {
            self.errors.insert(0, message.to_string());
        }
    }

    /// Page shared with the test body while a selection is still pending.
    struct SharedPage(Rc<RefCell<Page>>);

    impl Surface for SharedPage {
        fn write(&mut self, region: Region, content: Content) {
            self.0.borrow_mut().write(region, content);
        }

        fn prepend_error(&mut self, message: &str) {
            self.0.borrow_mut().prepend_error(message);
        }
    }

    fn document(value: serde_json::Value) -> ResultsDocument {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> ResultsDocument {
        document(json!({
            "current_draw": {
                "numero_sorteo": "1234",
                "fecha": "25/12/2024",
                "numeros_telekino": [1, 2, 3, 14, 25],
                "numeros_rekino": [7]
            },
            "historical_draws": {
                "1233": {
                    "numero_sorteo": "1233",
                    "fecha": "18/12/24",
                    "numeros_telekino": [9],
                    "numeros_rekino": []
                }
            },
            "available_draws": [
                { "numero": "1234", "fecha": "25/12/2024", "color": "Verde" },
                { "numero": "1233", "fecha": "18/12/2024", "color": "Rojo" },
                { "numero": "1232", "fecha": "11/12/2024", "color": "Azul" }
            ]
        }))
    }

    fn viewer() -> DrawViewer<Page> {
        DrawViewer::new(Page::new()).with_select_delay(Duration::ZERO)
    }

    #[test]
    fn renders_current_draw_on_load() {
        let mut viewer = viewer();
        viewer.present(sample());
        let page = viewer.surface();

        assert_eq!(page.numbers(Pool::Telekino), &["01", "02", "03", "14", "25"]);
        assert_eq!(page.numbers(Pool::Rekino), &["07"]);
        assert_eq!(page.text(Region::DrawNumber), Some("Sorteo #1234"));
        assert_eq!(page.text(Region::DrawDate), Some(format_date("25/12/2024").as_str()));
        assert!(page.errors().is_empty());
        assert_eq!(viewer.selected(), Some(&DrawNumber::from("1234")));
    }

    #[test]
    fn render_draw_without_number_or_date() {
        let mut viewer = viewer();
        viewer.render_draw(&DrawRecord {
            rekino: Some(vec![3, 11]),
            ..Default::default()
        });
        let page = viewer.surface();

        assert_eq!(page.text(Region::DrawNumber), Some(NO_DRAW_NUMBER_TEXT));
        assert_eq!(page.text(Region::DrawDate), Some(NO_DATE_TEXT));
        assert_eq!(page.numbers(Pool::Rekino), &["03", "11"]);
        assert_eq!(page.get(Region::Prizes), Some(&Content::Prizes(Vec::new())));
    }

    #[test]
    fn selector_marks_current_draw() {
        let mut viewer = viewer();
        viewer.present(sample());

        let Some(Content::Options(options)) = viewer.surface().get(Region::AvailableDraws) else {
            panic!("selector not rendered");
        };
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].label, "Sorteo 1234 - 25/12/2024 - Verde");
        assert!(options[0].selected);
        assert!(!options[1].selected && !options[2].selected);
    }

    #[test]
    fn empty_number_lists_render_placeholders() {
        let mut viewer = viewer();
        viewer.present(document(json!({
            "current_draw": { "numero_sorteo": "10", "numeros_telekino": [] }
        })));
        let page = viewer.surface();

        assert_eq!(
            page.placeholder(Region::TelekinoNumbers),
            Some(&Placeholder::NoNumbers(Pool::Telekino))
        );
        assert_eq!(
            page.placeholder(Region::RekinoNumbers),
            Some(&Placeholder::NoNumbers(Pool::Rekino))
        );
        assert_eq!(page.number_count(), 0);
        assert_eq!(page.text(Region::DrawDate), Some(NO_DATE_TEXT));
    }

    #[test]
    fn missing_current_draw_shows_banner_but_keeps_selector() {
        let mut viewer = viewer();
        viewer.present(document(json!({
            "available_draws": [{ "numero": "5", "fecha": "01/01/24", "color": "Verde" }]
        })));
        let page = viewer.surface();

        assert_eq!(page.errors(), &[NO_CURRENT_DRAW_MESSAGE]);
        assert_eq!(page.number_count(), 0);
        assert!(matches!(
            page.get(Region::AvailableDraws),
            Some(Content::Options(options)) if options.len() == 1 && !options[0].selected
        ));
    }

    #[tokio::test]
    async fn selecting_historical_draw_renders_it() {
        let mut viewer = viewer();
        viewer.present(sample());
        viewer.select_draw("1233").await;
        let page = viewer.surface();

        assert_eq!(page.numbers(Pool::Telekino), &["09"]);
        assert_eq!(
            page.placeholder(Region::RekinoNumbers),
            Some(&Placeholder::NoNumbers(Pool::Rekino))
        );
        assert_eq!(page.text(Region::DrawNumber), Some("Sorteo #1233"));
        assert_eq!(viewer.selected(), Some(&DrawNumber::from("1233")));
    }

    #[tokio::test]
    async fn selecting_unknown_draw_keeps_label() {
        let mut viewer = viewer();
        viewer.present(sample());
        viewer.select_draw("1232").await;
        let page = viewer.surface();

        let missing = Placeholder::MissingDraw(DrawNumber::from("1232"));
        assert_eq!(page.placeholder(Region::TelekinoNumbers), Some(&missing));
        assert_eq!(page.placeholder(Region::RekinoNumbers), Some(&missing));
        assert_eq!(page.text(Region::DrawNumber), Some("Sorteo #1232"));
        assert_eq!(page.text(Region::DrawDate), Some(NO_DATE_TEXT));
        assert_eq!(page.number_count(), 0);
    }

    #[tokio::test]
    async fn selecting_back_to_current_draw() {
        let mut viewer = viewer();
        viewer.present(sample());
        viewer.select_draw("9999").await;
        viewer.select_draw("1234").await;

        assert_eq!(viewer.surface().numbers(Pool::Rekino), &["07"]);
        assert_eq!(viewer.surface().text(Region::DrawNumber), Some("Sorteo #1234"));
    }

    #[tokio::test]
    async fn blank_selection_is_ignored() {
        let mut viewer = viewer();
        viewer.present(sample());
        viewer.select_draw("   ").await;

        assert_eq!(viewer.selected(), Some(&DrawNumber::from("1234")));
        assert_eq!(viewer.surface().numbers(Pool::Telekino).len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn loading_placeholders_stay_up_during_delay() {
        let page = Rc::new(RefCell::new(Page::new()));
        let mut viewer = DrawViewer::new(SharedPage(Rc::clone(&page)))
            .with_select_delay(Duration::from_millis(300));
        viewer.present(sample());

        let selection = viewer.select_draw("1233");
        tokio::pin!(selection);

        let pending = tokio::time::timeout(Duration::from_millis(100), &mut selection).await;
        assert!(pending.is_err(), "selection finished before its delay");
        {
            let page = page.borrow();
            assert_eq!(
                page.placeholder(Region::TelekinoNumbers),
                Some(&Placeholder::Loading(Pool::Telekino))
            );
            assert_eq!(
                page.placeholder(Region::RekinoNumbers),
                Some(&Placeholder::Loading(Pool::Rekino))
            );
            assert_eq!(page.text(Region::DrawNumber), Some("Sorteo #1234"));
        }

        tokio::time::advance(Duration::from_millis(200)).await;
        selection.await;

        let page = page.borrow();
        assert_eq!(page.numbers(Pool::Telekino), &["09"]);
        assert_eq!(page.text(Region::DrawNumber), Some("Sorteo #1233"));
    }

    #[tokio::test]
    async fn broken_historical_entry_does_not_hide_current_draw() {
        let document: ResultsDocument = serde_json::from_str(
            r#"{
                "current_draw": {"numero_sorteo": "1234", "numeros_telekino": [1, 2, 3]},
                "historical_draws": {
                    "1233": {"numero_sorteo": "1233", "numeros_telekino": ["05", null]},
                    "1232": {"numero_sorteo": [1232]}
                },
                "available_draws": [{"fecha": "01/01/24"}, {"numero": "1233"}]
            }"#,
        )
        .unwrap();

        let mut viewer = viewer();
        viewer.present(document);
        assert!(viewer.surface().errors().is_empty());
        assert_eq!(viewer.surface().numbers(Pool::Telekino), &["01", "02", "03"]);
        assert!(matches!(
            viewer.surface().get(Region::AvailableDraws),
            Some(Content::Options(options)) if options.len() == 1
        ));

        viewer.select_draw("1233").await;
        assert_eq!(viewer.surface().numbers(Pool::Telekino), &["05"]);

        viewer.select_draw("1232").await;
        assert_eq!(
            viewer.surface().placeholder(Region::TelekinoNumbers),
            Some(&Placeholder::MissingDraw(DrawNumber::from("1232")))
        );
        assert_eq!(viewer.surface().text(Region::DrawNumber), Some("Sorteo #1232"));
    }

    #[tokio::test]
    async fn loading_placeholder_precedes_final_content() {
        let mut viewer =
            DrawViewer::new(Recorder::default()).with_select_delay(Duration::from_millis(5));
        viewer.present(sample());
        let before = viewer.surface().writes.len();

        viewer.select_draw("1233").await;
        let writes = &viewer.surface().writes[before..];

        assert_eq!(
            writes[0],
            (
                Region::TelekinoNumbers,
                Content::Placeholder(Placeholder::Loading(Pool::Telekino))
            )
        );
        assert_eq!(
            writes[1],
            (
                Region::RekinoNumbers,
                Content::Placeholder(Placeholder::Loading(Pool::Rekino))
            )
        );
        assert!(writes[2..].iter().any(|(region, content)| *region == Region::TelekinoNumbers
            && matches!(content, Content::Numbers { .. })));
    }

    #[tokio::test]
    async fn load_failure_shows_one_banner_and_no_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource::File(dir.path().join("resultados.json"));

        let mut viewer = viewer();
        let result = viewer.initialize(&source).await;

        assert!(result.is_err());
        assert!(!viewer.is_loaded());
        let page = viewer.surface();
        assert_eq!(page.errors(), &[LOAD_ERROR_MESSAGE]);
        assert_eq!(page.number_count(), 0);
        assert!(page.get(Region::DrawNumber).is_none());
    }
}

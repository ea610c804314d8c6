//! PDF assembly.
//!
//! Lays the report sections out with [`layout::Composer`] and writes the
//! resulting pages with `pdf-writer`. Only the two standard Helvetica faces
//! are referenced, so no font data is embedded. Nothing in the output
//! depends on anything but the report data, the configuration and the
//! branding image.

pub mod layout;
pub mod text;

use chrono::{Datelike, NaiveDateTime, Timelike};
use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Date, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};
use tracing::debug;

use crate::branding::{BrandingImage, BRANDING_HEIGHT_PT, BRANDING_WIDTH_PT};
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::generator::ReportData;
use crate::sections::{CategoryTable, HeaderSection, SignatureBlock, METADATA_COLUMNS};

use layout::{
    Align, Cell, Composer, PageGeometry, Rgb, Table, TextStyle, BLACK, PAGE_HEIGHT, PAGE_WIDTH,
    WHITE,
};
use text::FontFace;

const BRANDING_XOBJECT: &[u8] = b"Im1";
const COMPRESSION_LEVEL: u8 = 6;

const METADATA_WIDTHS: [f32; METADATA_COLUMNS] = [0.15, 0.2, 0.15, 0.25, 0.25];
const DESCRIPTION_SHARE: f32 = 0.68;
const STATUS_SHARE: f32 = 0.08;
const SIGNATURE_COLUMN_WIDTH: f32 = 198.0;

/// Encoded document.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

struct Styles {
    accent: Rgb,
    title: TextStyle,
    legend: TextStyle,
    heading: TextStyle,
    body: TextStyle,
    footer: TextStyle,
    page_number: TextStyle,
}

impl Styles {
    fn from_config(config: &ReportConfig) -> Result<Self> {
        let accent = config.theme.accent_rgb()?;
        let muted = config.theme.muted_rgb()?;
        let style = |face, size, color, align, space_after| TextStyle {
            face,
            size,
            color,
            align,
            space_after,
        };
        Ok(Styles {
            accent,
            title: style(FontFace::Bold, 16.0, BLACK, Align::Center, 40.0),
            legend: style(FontFace::Regular, 10.0, BLACK, Align::Left, 15.0),
            heading: style(FontFace::Bold, 12.0, accent, Align::Left, 10.0),
            body: style(FontFace::Regular, 10.0, BLACK, Align::Left, 30.0),
            footer: style(FontFace::Regular, 8.0, muted, Align::Center, 0.0),
            page_number: style(FontFace::Regular, 8.0, muted, Align::Right, 0.0),
        })
    }
}

/// Lay out and encode a report.
pub fn write_pdf(
    data: &ReportData,
    config: &ReportConfig,
    branding: Option<&BrandingImage>,
) -> Result<PdfDocument> {
    let styles = Styles::from_config(config)?;
    let page = &config.page;
    let geometry = PageGeometry::new(
        page.margin_top,
        page.margin_bottom,
        page.margin_left,
        page.margin_right,
    );
    if geometry.width() <= 0.0 || geometry.top <= geometry.bottom {
        return Err(ReportError::Layout(
            "page margins leave no room for content".to_string(),
        ));
    }

    let pages = compose(data, config, &styles, geometry, branding.is_some());
    let page_count = pages.len();
    let bytes = encode(data, config, pages, branding)?;

    debug!(pages = page_count, bytes = bytes.len(), "PDF encoded");
    Ok(PdfDocument { bytes, page_count })
}

fn compose(
    data: &ReportData,
    config: &ReportConfig,
    styles: &Styles,
    geometry: PageGeometry,
    with_branding: bool,
) -> Vec<Content> {
    let width = geometry.width();
    let mut composer = Composer::new(geometry);

    if with_branding {
        composer.image(BRANDING_XOBJECT, BRANDING_WIDTH_PT, BRANDING_HEIGHT_PT);
        composer.space(12.0);
    }

    composer.paragraph(&data.header.title, &styles.title);
    composer.table(&metadata_table(&data.header, width, styles.accent));
    composer.space(15.0);
    composer.paragraph(&data.header.legend, &styles.legend);

    for category in &data.items.tables {
        let table = category_table(category, width, styles.accent);
        // Keep the heading with the header row and first item
        composer.ensure(
            composer.paragraph_height(&category.name, &styles.heading)
                + composer.table_lead_height(&table),
        );
        composer.paragraph(&category.name, &styles.heading);
        composer.table(&table);
        composer.space(10.0);
    }

    composer.space(20.0);
    composer.paragraph(&data.observations.text, &styles.body);

    let signatures = signature_table(&data.signatures);
    let heading = TextStyle {
        color: BLACK,
        align: Align::Center,
        ..styles.heading
    };
    composer.ensure(
        composer.paragraph_height(&data.signatures.heading, &heading)
            + composer.table_lead_height(&signatures)
            + 2.0 * signatures.font_size * 1.2,
    );
    composer.paragraph(&data.signatures.heading, &heading);
    composer.table(&signatures);

    composer.space(30.0);
    composer.paragraph(&data.footer.text, &styles.footer);

    let number_baseline = config.page.margin_bottom / 2.0;
    composer.finish(
        config
            .page_numbers
            .then_some((&styles.page_number, number_baseline)),
    )
}

fn metadata_table(header: &HeaderSection, width: f32, accent: Rgb) -> Table {
    let rows = header
        .metadata_rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            row.iter()
                .enumerate()
                .map(|(col, text)| {
                    let cell = Cell::new(text.clone());
                    match col {
                        0 | 2 => cell.bold(),
                        4 if row_index < 2 => cell.bold().centered().filled(accent, WHITE),
                        4 => cell.centered(),
                        _ => cell,
                    }
                })
                .collect()
        })
        .collect();

    Table {
        col_widths: METADATA_WIDTHS.iter().map(|share| share * width).collect(),
        rows,
        header_rows: 0,
        font_size: 9.0,
        padding: 8.0,
        grid: Some(0.5),
    }
}

fn category_table(category: &CategoryTable, width: f32, accent: Rgb) -> Table {
    let status_columns = category.status_columns.len();
    let mut col_widths = vec![DESCRIPTION_SHARE * width];
    col_widths.extend(std::iter::repeat(STATUS_SHARE * width).take(status_columns));

    let header = category
        .header_row()
        .into_iter()
        .enumerate()
        .map(|(col, text)| {
            let cell = Cell::new(text).bold().filled(accent, WHITE);
            if col == 0 {
                cell
            } else {
                cell.centered()
            }
        })
        .collect();

    let mut rows = vec![header];
    rows.extend(category.rows.iter().map(|row| {
        std::iter::once(Cell::new(row.item.clone()))
            .chain(row.status_cells().map(|mark| Cell::new(mark).centered()))
            .collect()
    }));

    Table {
        col_widths,
        rows,
        header_rows: 1,
        font_size: 8.0,
        padding: 4.0,
        grid: Some(0.5),
    }
}

fn signature_table(block: &SignatureBlock) -> Table {
    let columns = &block.columns;
    Table {
        col_widths: vec![SIGNATURE_COLUMN_WIDTH; columns.len()],
        rows: vec![
            columns
                .iter()
                .map(|c| Cell::new(c.title.clone()).bold().centered())
                .collect(),
            columns
                .iter()
                .map(|c| Cell::new(c.line.clone()).centered())
                .collect(),
            columns
                .iter()
                .map(|c| Cell::new(c.date_line.clone()).centered())
                .collect(),
        ],
        header_rows: 0,
        font_size: 10.0,
        padding: 4.0,
        grid: None,
    }
}

fn encode(
    data: &ReportData,
    config: &ReportConfig,
    pages: Vec<Content>,
    branding: Option<&BrandingImage>,
) -> Result<Vec<u8>> {
    let catalog_id = Ref::new(1);
    let tree_id = Ref::new(2);
    let regular_id = Ref::new(3);
    let bold_id = Ref::new(4);
    let info_id = Ref::new(5);
    let image_id = Ref::new(6);
    let mask_id = Ref::new(7);
    let first_page = 8;

    let page_ids: Vec<Ref> = (0..pages.len())
        .map(|i| Ref::new(first_page + 2 * i as i32))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    for (id, face) in [(regular_id, FontFace::Regular), (bold_id, FontFace::Bold)] {
        pdf.type1_font(id)
            .base_font(Name(face.base_font()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    if let Some(image) = branding {
        write_image(&mut pdf, image, image_id, mask_id)?;
    }

    for (content, page_id) in pages.into_iter().zip(&page_ids) {
        let content_id = Ref::new(page_id.get() + 1);
        let stream = content.finish();

        if config.compress_streams {
            let compressed = compress_to_vec_zlib(&stream, COMPRESSION_LEVEL);
            pdf.stream(content_id, &compressed)
                .filter(Filter::FlateDecode);
        } else {
            pdf.stream(content_id, &stream);
        }

        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(tree_id);
        page.contents(content_id);
        let mut resources = page.resources();
        resources
            .fonts()
            .pair(Name(FontFace::Regular.resource_name()), regular_id)
            .pair(Name(FontFace::Bold.resource_name()), bold_id);
        if branding.is_some() {
            resources.x_objects().pair(Name(BRANDING_XOBJECT), image_id);
        }
        resources.finish();
        page.finish();
    }

    let at = data.generated_at;
    pdf.document_info(info_id)
        .title(TextStr(&data.header.title))
        .producer(TextStr(&config.system_name))
        .creator(TextStr(&format!("sc-report {}", data.generator_version)))
        .creation_date(pdf_date(at)?);

    Ok(pdf.finish())
}

fn write_image(pdf: &mut Pdf, image: &BrandingImage, image_id: Ref, mask_id: Ref) -> Result<()> {
    let width = i32::try_from(image.width)
        .map_err(|_| ReportError::Layout("branding image too wide".to_string()))?;
    let height = i32::try_from(image.height)
        .map_err(|_| ReportError::Layout("branding image too tall".to_string()))?;

    let rgb = compress_to_vec_zlib(&image.rgb, COMPRESSION_LEVEL);
    let mut xobject = pdf.image_xobject(image_id, &rgb);
    xobject.filter(Filter::FlateDecode);
    xobject.width(width);
    xobject.height(height);
    xobject.color_space().device_rgb();
    xobject.bits_per_component(8);
    if image.alpha.is_some() {
        xobject.s_mask(mask_id);
    }
    xobject.finish();

    if let Some(alpha) = &image.alpha {
        let alpha = compress_to_vec_zlib(alpha, COMPRESSION_LEVEL);
        let mut mask = pdf.image_xobject(mask_id, &alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(width);
        mask.height(height);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask.finish();
    }
    Ok(())
}

fn pdf_date(at: NaiveDateTime) -> Result<Date> {
    let year = u16::try_from(at.year())
        .map_err(|_| ReportError::Layout(format!("year {} out of range", at.year())))?;
    // chrono guarantees the remaining fields fit in a byte
    Ok(Date::new(year)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8))
}

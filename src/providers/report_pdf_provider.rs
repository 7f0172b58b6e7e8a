use chrono::{DateTime, Utc};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::errors::InternalError;
use crate::types::internal::report::{ReportData, percentage};
use crate::types::internal::{ReportFilter, RequestStatus};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const LINE_HEIGHT: f32 = 6.0;
const DESCRIPTION_MAX_CHARS: usize = 48;

/// Renders the management report as an A4 PDF
#[derive(Debug, Default)]
pub struct ReportPdfProvider;

impl ReportPdfProvider {
    pub fn new() -> Self {
        Self
    }

    /// Render the report to PDF bytes
    pub fn render(
        &self,
        data: &ReportData,
        filter: &ReportFilter,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, InternalError> {
        let mut page = PageWriter::new("Reporte de Gestión")?;

        page.text("Reporte de Gestión", 20.0, MARGIN, true);
        page.advance(2.0);
        page.text(
            &format!("Generado el {}", generated_at.format("%d/%m/%Y %H:%M")),
            10.0,
            MARGIN,
            false,
        );
        if let Some(filters) = describe_filter(filter) {
            page.text(&format!("Filtros: {}", filters), 10.0, MARGIN, false);
        }
        page.advance(1.0);

        page.text("Resumen", 14.0, MARGIN, true);
        page.text(
            &format!("Total de beneficiarios: {}", data.total_beneficiaries),
            11.0,
            MARGIN,
            false,
        );
        page.text(
            &format!("Total de solicitudes: {}", data.total_requests),
            11.0,
            MARGIN,
            false,
        );
        page.text(
            &format!("Tasa de aprobación: {}%", data.approval_rate()),
            11.0,
            MARGIN,
            false,
        );
        page.text(
            &format!(
                "Solicitudes pendientes: {}",
                data.status_count(RequestStatus::Pending)
            ),
            11.0,
            MARGIN,
            false,
        );
        page.advance(1.0);

        page.text("Solicitudes por estado", 14.0, MARGIN, true);
        page.row(&["Estado", "Cantidad", "Porcentaje"], &[MARGIN, 90.0, 130.0], true);
        for group in &data.by_status {
            page.row(
                &[
                    group.key.as_str(),
                    &group.count.to_string(),
                    &format!("{:.1}%", percentage(group.count, data.total_requests)),
                ],
                &[MARGIN, 90.0, 130.0],
                false,
            );
        }
        page.advance(1.0);

        page.text("Solicitudes por prioridad", 14.0, MARGIN, true);
        page.row(&["Prioridad", "Cantidad", "Porcentaje"], &[MARGIN, 90.0, 130.0], true);
        for group in &data.by_priority {
            page.row(
                &[
                    group.key.as_str(),
                    &group.count.to_string(),
                    &format!("{:.1}%", percentage(group.count, data.total_requests)),
                ],
                &[MARGIN, 90.0, 130.0],
                false,
            );
        }
        page.advance(1.0);

        page.text("Solicitudes recientes", 14.0, MARGIN, true);
        let columns = [MARGIN, 100.0, 150.0, 178.0];
        page.row(&["Descripción", "Beneficiario", "Estado", "Fecha"], &columns, true);
        if data.recent_requests.is_empty() {
            page.text("No hay solicitudes registradas", 10.0, MARGIN, false);
        }
        for item in &data.recent_requests {
            let beneficiary = item.beneficiary_name().unwrap_or("-");
            page.row(
                &[
                    &truncate(&item.request.description, DESCRIPTION_MAX_CHARS),
                    &truncate(beneficiary, 26),
                    item.request.status.as_str(),
                    &format_date(item.request.created_at),
                ],
                &columns,
                false,
            );
        }

        page.finish()
    }
}

/// Cursor over the pages of a document being written top to bottom
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, InternalError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| InternalError::parse("pdf_font", format!("{:?}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| InternalError::parse("pdf_font", format!("{:?}", e)))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
        })
    }

    fn ensure_space(&mut self) {
        if self.y < MARGIN + LINE_HEIGHT {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn text(&mut self, text: &str, size: f32, x: f32, bold: bool) {
        self.ensure_space();
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
        self.y -= LINE_HEIGHT + (size - 10.0).max(0.0) * 0.3;
    }

    fn row(&mut self, cells: &[&str], columns: &[f32], bold: bool) {
        self.ensure_space();
        let font = if bold { &self.bold } else { &self.regular };
        for (cell, x) in cells.iter().zip(columns) {
            self.layer.use_text(*cell, 9.0, Mm(*x), Mm(self.y), font);
        }
        self.y -= LINE_HEIGHT;
    }

    fn advance(&mut self, lines: f32) {
        self.y -= LINE_HEIGHT * lines;
    }

    fn finish(self) -> Result<Vec<u8>, InternalError> {
        self.doc
            .save_to_bytes()
            .map_err(|e| InternalError::parse("pdf_document", format!("{:?}", e)))
    }
}

fn describe_filter(filter: &ReportFilter) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(status) = filter.status {
        parts.push(format!("Estado = {}", status));
    }
    if let Some(priority) = filter.priority {
        parts.push(format!("Prioridad = {}", priority));
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// `dd/mm/yyyy` for an epoch-millisecond timestamp
pub fn format_date(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(max_chars - 3).collect();
        truncated.push_str("...");
        truncated
    }
}

/// Suggested download name, e.g. `reporte-2025-03-01.pdf`
pub fn report_file_name(generated_at: DateTime<Utc>) -> String {
    format!("reporte-{}.pdf", generated_at.format("%Y-%m-%d"))
}

//! Dashboard Viewer Widget
//! Central scrollable panel: metric cards, group tables, country chart and
//! the sortable detail table.

use egui::{Color32, RichText, ScrollArea};
use egui_plot::{Bar, BarChart, Plot};
use grantscope::charts::GeoDataset;
use grantscope::dashboard::{DashboardView, DetailView, SummaryMetrics};
use grantscope::stats::Bucket;

const ACCENT: Color32 = Color32::from_rgb(31, 111, 235);
const CARD_WIDTH: f32 = 150.0;
const SECTION_SPACING: f32 = 15.0;
/// Bars shown in the country chart; the rest stay in the table.
const MAX_BARS: usize = 30;

/// Draws a [`DashboardView`]. Holds no data of its own.
#[derive(Default)]
pub struct ChartViewer;

impl ChartViewer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the view. Returns the detail column key whose header was clicked.
    pub fn show(&mut self, ui: &mut egui::Ui, view: Option<&DashboardView>) -> Option<String> {
        let Some(view) = view else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return None;
        };

        let mut clicked = None;
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new(&view.summary.subtitle).size(13.0).color(Color32::GRAY));
                ui.add_space(8.0);
                Self::draw_metric_cards(ui, &view.summary);
                ui.add_space(8.0);
                Self::draw_breakdown(ui, &view.summary);
                ui.add_space(SECTION_SPACING);

                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new("By Country").size(14.0).strong());
                        Self::draw_bucket_table(ui, "country_table", "Country", &view.countries);
                    });
                    ui.add_space(SECTION_SPACING);
                    ui.vertical(|ui| {
                        ui.label(RichText::new("By Region").size(14.0).strong());
                        Self::draw_bucket_table(ui, "region_table", "Region", &view.regions);
                    });
                });
                ui.add_space(SECTION_SPACING);

                Self::draw_geo_chart(ui, &view.geo);
                ui.add_space(SECTION_SPACING);

                ui.label(RichText::new("Grant Details").size(14.0).strong());
                clicked = Self::draw_detail_table(ui, &view.detail);
            });
        clicked
    }

    fn draw_metric_cards(ui: &mut egui::Ui, summary: &SummaryMetrics) {
        let cards = [
            ("Grants", summary.total.to_string()),
            ("Active", summary.active.to_string()),
            ("Closed", summary.closed.to_string()),
            ("Amount", summary.amount_display.clone()),
            ("Countries", summary.countries.to_string()),
            ("Regions", summary.regions.to_string()),
        ];
        ui.horizontal_wrapped(|ui| {
            for (label, value) in cards {
                egui::Frame::none()
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .rounding(8.0)
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.set_width(CARD_WIDTH);
                        ui.vertical(|ui| {
                            ui.label(RichText::new(label).size(11.0).color(Color32::GRAY));
                            ui.label(RichText::new(value).size(22.0).strong().color(ACCENT));
                        });
                    });
            }
        });
    }

    fn draw_breakdown(ui: &mut egui::Ui, summary: &SummaryMetrics) {
        for line in [
            &summary.status_breakdown,
            &summary.role_breakdown,
            &summary.amount_breakdown,
        ] {
            ui.label(RichText::new(line).size(12.0));
        }
    }

    fn draw_bucket_table(ui: &mut egui::Ui, id: &str, heading: &str, buckets: &[Bucket]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt(id)
                    .max_height(260.0)
                    .show(ui, |ui| {
                        egui::Grid::new(ui.make_persistent_id(id))
                            .striped(true)
                            .min_col_width(60.0)
                            .spacing([12.0, 4.0])
                            .show(ui, |ui| {
                                ui.label(RichText::new(heading).strong().size(11.0));
                                ui.label(RichText::new("Grants").strong().size(11.0));
                                ui.end_row();
                                for bucket in buckets {
                                    ui.label(RichText::new(&bucket.label).size(11.0));
                                    ui.label(RichText::new(bucket.count.to_string()).size(11.0));
                                    ui.end_row();
                                }
                            });
                    });
            });
    }

    /// Horizontal-axis bar chart standing in for the choropleth.
    fn draw_geo_chart(ui: &mut egui::Ui, geo: &GeoDataset) {
        ui.label(RichText::new(&geo.title).size(14.0).strong());
        if !geo.is_empty() {
            let points: Vec<_> = geo.points.iter().take(MAX_BARS).collect();
            let labels: Vec<String> = points.iter().map(|p| p.country.clone()).collect();
            let bars: Vec<Bar> = points
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    Bar::new(i as f64, p.count as f64)
                        .name(p.hover_text())
                        .width(0.7)
                        .fill(ACCENT)
                })
                .collect();

            Plot::new("geo_chart")
                .height(260.0)
                .allow_zoom(false)
                .allow_drag(false)
                .allow_scroll(false)
                .y_axis_label("Grants")
                .x_axis_formatter(move |mark, _range| {
                    let idx = mark.value.round();
                    if idx >= 0.0 && (idx - mark.value).abs() < f64::EPSILON {
                        labels.get(idx as usize).cloned().unwrap_or_default()
                    } else {
                        String::new()
                    }
                })
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(BarChart::new(bars).color(ACCENT));
                });
        }
        if !geo.caption.is_empty() {
            ui.label(RichText::new(&geo.caption).size(11.0).color(Color32::GRAY));
        }
    }

    fn draw_detail_table(ui: &mut egui::Ui, detail: &DetailView) -> Option<String> {
        let mut clicked = None;
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::horizontal().id_salt("detail_scroll").show(ui, |ui| {
                    egui::Grid::new(ui.make_persistent_id("detail_table"))
                        .striped(true)
                        .min_col_width(80.0)
                        .spacing([10.0, 4.0])
                        .show(ui, |ui| {
                            for column in &detail.columns {
                                let text = match detail.indicator(&column.key) {
                                    Some(arrow) => format!("{} {}", column.label, arrow),
                                    None => column.label.clone(),
                                };
                                if ui
                                    .button(RichText::new(text).strong().size(11.0))
                                    .clicked()
                                {
                                    clicked = Some(column.key.clone());
                                }
                            }
                            ui.end_row();

                            for row in &detail.rows {
                                for column in &detail.columns {
                                    ui.label(RichText::new(row.field(&column.key)).size(11.0));
                                }
                                ui.end_row();
                            }
                        });
                });
            });
        clicked
    }
}

use cgmath::Vector2;
use iced::widget::image::Handle;
use iced::widget::{button, column, container, mouse_area, pick_list, row, scrollable, text, Canvas};
use iced::{Alignment, Border, Element, Length, Subscription, Task, Theme};
use iced_aw::Wrap;
use rfd::FileDialog;

// Declare the application modules
mod img;
mod state;
mod ui;

use img::{filters, loader};
use state::data::{ImageEntry, Shape};
use state::edit::{EditPatch, FilterPreset, ROTATE_STEP, ZOOM_STEP};
use state::gallery::Gallery;
use ui::tile::{TileCanvas, TILE_SIZE};

/// An in-progress reorder drag, started from a tile header
#[derive(Debug, Clone, Copy)]
struct ReorderDrag {
    /// Id of the tile being dragged
    active: i64,
    /// Id of the tile currently under the cursor, if any
    over: Option<i64>,
}

/// Main application state
struct ShapeCollage {
    /// The gallery store: tile list and shape selection
    gallery: Gallery,
    /// Reorder drag in flight, if any
    drag: Option<ReorderDrag>,
    /// Status message to display to the user
    status: String,
    /// Whether a decode batch is still running
    loading: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the "Add Photos" button
    PickImages,
    /// Background decode completed with results
    ImagesLoaded(Result<loader::LoadResult, String>),
    /// User picked a tile silhouette from the toolbar
    ShapePicked(Shape),
    /// Rotate one tile by a fixed step
    Rotate(i64),
    ZoomIn(i64),
    ZoomOut(i64),
    /// Wheel zoom over a tile, signed step already applied
    ZoomBy(i64, f32),
    /// Apply a color filter preset to one tile
    SetFilter(i64, FilterPreset),
    /// Background filter render completed
    FilterRendered(i64, FilterPreset, Handle),
    /// Restore one tile's transforms to defaults
    ResetTile(i64),
    /// Delete one tile from the gallery
    RemoveTile(i64),
    /// Pan gesture delta for one tile
    Pan(i64, Vector2<f32>),
    /// Reorder drag started from a tile header
    DragStarted(i64),
    /// Cursor entered a tile while anywhere in the grid
    DragEntered(i64),
    /// Cursor left a tile
    DragLeft(i64),
    /// Left button released somewhere in the window
    Dropped,
}

impl ShapeCollage {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        log::info!("Shape Collage initialized");

        (
            ShapeCollage {
                gallery: Gallery::new(),
                drag: None,
                status: String::from("Ready. Add photos to start a collage."),
                loading: false,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImages => {
                // Show the native file picker, restricted to image files
                let files = FileDialog::new()
                    .set_title("Select Photos")
                    .add_filter("Images", &loader::IMAGE_EXTENSIONS)
                    .pick_files();

                if let Some(paths) = files {
                    self.loading = true;
                    self.status = format!("Loading {} photos...", paths.len());

                    // Decode in the background to keep the UI responsive
                    return Task::perform(loader::load_images(paths), Message::ImagesLoaded);
                }

                Task::none()
            }
            Message::ImagesLoaded(Ok(result)) => {
                self.loading = false;
                let added = result.images.len();
                self.gallery.add_images(result.images);

                self.status = if result.failed > 0 {
                    format!(
                        "Added {} photos ({} failed to decode). {} in the grid.",
                        added,
                        result.failed,
                        self.gallery.len()
                    )
                } else {
                    format!("Added {} photos. {} in the grid.", added, self.gallery.len())
                };
                log::info!("{}", self.status);

                Task::none()
            }
            Message::ImagesLoaded(Err(error)) => {
                self.loading = false;
                self.status = format!("Loading failed: {}", error);
                log::error!("decode batch failed: {}", error);
                Task::none()
            }
            Message::ShapePicked(shape) => {
                // Global selection: every tile re-renders with the new mask
                self.gallery.set_shape(shape);
                Task::none()
            }
            Message::Rotate(id) => {
                if let Some(entry) = self.gallery.get(id) {
                    let rotation = entry.edit.rotation + ROTATE_STEP;
                    self.gallery.update_image(id, EditPatch::rotation(rotation));
                }
                Task::none()
            }
            Message::ZoomIn(id) => self.update(Message::ZoomBy(id, ZOOM_STEP)),
            Message::ZoomOut(id) => self.update(Message::ZoomBy(id, -ZOOM_STEP)),
            Message::ZoomBy(id, delta) => {
                if let Some(entry) = self.gallery.get(id) {
                    // The store floors the result at the minimum scale
                    let scale = entry.edit.scale + delta;
                    self.gallery.update_image(id, EditPatch::scale(scale));
                }
                Task::none()
            }
            Message::SetFilter(id, preset) => {
                // State changes immediately; pixels catch up when the
                // background render lands
                self.gallery.update_image(id, EditPatch::filter(preset));

                if let Some(entry) = self.gallery.get(id) {
                    if entry.needs_filter_render() {
                        let pixels = entry.source.pixels.clone();
                        return Task::perform(
                            filters::render(id, preset, pixels),
                            |(id, preset, handle)| Message::FilterRendered(id, preset, handle),
                        );
                    }
                }

                Task::none()
            }
            Message::FilterRendered(id, preset, handle) => {
                self.gallery.store_filtered(id, preset, handle);
                Task::none()
            }
            Message::ResetTile(id) => {
                self.gallery.reset_image(id);
                Task::none()
            }
            Message::RemoveTile(id) => {
                self.gallery.remove_image(id);

                // A drag involving the removed tile must not complete later
                if self.drag.map_or(false, |drag| drag.active == id) {
                    self.drag = None;
                } else if let Some(drag) = &mut self.drag {
                    if drag.over == Some(id) {
                        drag.over = None;
                    }
                }

                self.status = format!("{} photos in the grid.", self.gallery.len());
                Task::none()
            }
            Message::Pan(id, delta) => {
                if let Some(entry) = self.gallery.get(id) {
                    let offset = entry.edit.offset + delta;
                    self.gallery.update_image(id, EditPatch::offset(offset));
                }
                Task::none()
            }
            Message::DragStarted(id) => {
                self.drag = Some(ReorderDrag {
                    active: id,
                    over: None,
                });
                Task::none()
            }
            Message::DragEntered(id) => {
                if let Some(drag) = &mut self.drag {
                    drag.over = Some(id);
                }
                Task::none()
            }
            Message::DragLeft(id) => {
                if let Some(drag) = &mut self.drag {
                    if drag.over == Some(id) {
                        drag.over = None;
                    }
                }
                Task::none()
            }
            Message::Dropped => {
                // No-op when no drag is active, when the drop lands on
                // nothing, or when it lands on the dragged tile itself
                if let Some(drag) = self.drag.take() {
                    self.gallery.reorder(drag.active, drag.over);
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        if self.gallery.is_empty() {
            return self.empty_view();
        }

        let toolbar = row![
            button(text("Add Photos").size(14))
                .on_press_maybe((!self.loading).then_some(Message::PickImages))
                .padding(8),
            pick_list(
                &Shape::ALL[..],
                Some(self.gallery.shape()),
                Message::ShapePicked
            )
            .text_size(14)
            .padding(8),
            text(&self.status).size(14),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        let tiles: Vec<Element<Message>> = self
            .gallery
            .entries()
            .iter()
            .map(|entry| self.tile_view(entry))
            .collect();

        let grid = Wrap::with_elements(tiles).spacing(16.0).line_spacing(16.0);

        let content = column![toolbar, scrollable(grid).height(Length::Fill)]
            .spacing(16)
            .padding(16);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Landing screen shown before any photo has been added
    fn empty_view(&self) -> Element<Message> {
        let content = column![
            text("Shape Collage").size(48),
            button(text("Add Photos").size(16))
                .on_press_maybe((!self.loading).then_some(Message::PickImages))
                .padding(10),
            text(&self.status).size(16),
        ]
        .spacing(20)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// One tile: drag-handle header, shaped canvas, transform controls
    fn tile_view<'a>(&'a self, entry: &'a ImageEntry) -> Element<'a, Message> {
        let id = entry.id;
        let targeted = self
            .drag
            .map_or(false, |drag| drag.over == Some(id) && drag.active != id);
        let lifted = self.drag.map_or(false, |drag| drag.active == id);

        // The header strip is the reorder drag handle; the canvas below
        // keeps presses over the image for panning
        let header = mouse_area(
            row![
                text(&entry.filename).size(12).width(Length::Fill),
                button(text("x").size(12))
                    .on_press(Message::RemoveTile(id))
                    .padding(2),
            ]
            .spacing(4)
            .align_y(Alignment::Center),
        )
        .on_press(Message::DragStarted(id));

        let canvas = Canvas::new(TileCanvas {
            id,
            handle: entry.display_handle(),
            edit: entry.edit,
            shape: self.gallery.shape(),
        })
        .width(Length::Fixed(TILE_SIZE))
        .height(Length::Fixed(TILE_SIZE));

        let transforms = row![
            tile_button("Rotate", Message::Rotate(id)),
            tile_button("+", Message::ZoomIn(id)),
            tile_button("-", Message::ZoomOut(id)),
            tile_button("Reset", Message::ResetTile(id)),
        ]
        .spacing(4);

        let filter_presets = row![
            tile_button("Gray", Message::SetFilter(id, FilterPreset::Grayscale)),
            tile_button("Sepia", Message::SetFilter(id, FilterPreset::Sepia)),
            tile_button("Bright", Message::SetFilter(id, FilterPreset::Brighten)),
        ]
        .spacing(4);

        let body = column![header, canvas, transforms, filter_presets]
            .spacing(6)
            .align_x(Alignment::Center);

        let tile = container(body)
            .padding(8)
            .style(move |theme| tile_style(theme, targeted, lifted));

        // Enter/leave keep the current drop target up to date; both are
        // no-ops in update() while no drag is active
        mouse_area(tile)
            .on_enter(Message::DragEntered(id))
            .on_exit(Message::DragLeft(id))
            .into()
    }

    /// Process-wide pointer-release listener, acquired for exactly the
    /// duration of one reorder drag. Completes the drop even when the
    /// button is released outside every tile.
    fn subscription(&self) -> Subscription<Message> {
        if self.drag.is_none() {
            return Subscription::none();
        }

        iced::event::listen_with(|event, _status, _window| match event {
            iced::Event::Mouse(iced::mouse::Event::ButtonReleased(iced::mouse::Button::Left)) => {
                Some(Message::Dropped)
            }
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Small uniform control button under a tile
fn tile_button(label: &str, message: Message) -> Element<'_, Message> {
    button(text(label).size(12))
        .on_press(message)
        .padding([2, 6])
        .into()
}

/// Tile chrome: lifted tiles dim their border, targeted tiles glow
fn tile_style(theme: &Theme, targeted: bool, lifted: bool) -> container::Style {
    let palette = theme.extended_palette();

    let border_color = if targeted {
        palette.primary.strong.color
    } else if lifted {
        palette.background.strong.color
    } else {
        palette.background.weak.color
    };

    container::Style {
        background: Some(palette.background.weak.color.into()),
        border: Border {
            color: border_color,
            width: if targeted { 2.0 } else { 1.0 },
            radius: 10.0.into(),
        },
        ..container::Style::default()
    }
}

fn main() -> iced::Result {
    env_logger::init();

    iced::application("Shape Collage", ShapeCollage::update, ShapeCollage::view)
        .subscription(ShapeCollage::subscription)
        .theme(ShapeCollage::theme)
        .centered()
        .run_with(ShapeCollage::new)
}

use geo_types::LineString;

use super::Region;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const MIN_SIZE: f64 = 100.0;
const MAX_SIZE: f64 = 300.0;
const PADDING: f64 = 0.04;

fn ring_path(ring: &LineString<f64>) -> String {
    let mut points = ring.coords().map(|c| format!("{},{}", c.x, c.y));
    match points.next() {
        Some(first) => {
            let rest: Vec<String> = points.collect();
            if rest.is_empty() {
                format!("M {first} z")
            } else {
                format!("M {first} L {} z", rest.join(" L "))
            }
        }
        None => String::new(),
    }
}

impl Region {
    /// A small SVG drawing of the polygon, for notebooks and previews.
    ///
    /// Logs the region's label at `info` level.
    pub fn to_svg(&self) -> String {
        log::info!("{}", self);

        if self.polygon.exterior().0.is_empty() {
            return format!("<svg xmlns=\"{SVG_NS}\" />");
        }
        let [mut min_x, mut min_y, mut max_x, mut max_y] = self.bounds();
        if min_x == max_x && min_y == max_y {
            min_x -= 1.0;
            min_y -= 1.0;
            max_x += 1.0;
            max_y += 1.0;
        } else {
            let pad = (max_x - min_x).max(max_y - min_y) * PADDING;
            min_x -= pad;
            min_y -= pad;
            max_x += pad;
            max_y += pad;
        }
        let dx = max_x - min_x;
        let dy = max_y - min_y;
        let width = dx.clamp(MIN_SIZE, MAX_SIZE);
        let height = dy.clamp(MIN_SIZE, MAX_SIZE);
        let stroke_width = 2.0 * dx.max(dy) / width.max(height);

        let path: Vec<String> = std::iter::once(self.polygon.exterior())
            .chain(self.polygon.interiors())
            .map(ring_path)
            .collect();

        format!(
            "<svg xmlns=\"{SVG_NS}\" width=\"{width}\" height=\"{height}\" \
             viewBox=\"{min_x} {min_y} {dx} {dy}\" preserveAspectRatio=\"xMinYMin meet\">\
             <g transform=\"matrix(1,0,0,-1,0,{flip})\">\
             <path fill-rule=\"evenodd\" fill=\"#66cc99\" stroke=\"#555555\" \
             stroke-width=\"{stroke_width}\" opacity=\"0.6\" d=\"{d}\" />\
             </g></svg>",
            flip = max_y + min_y,
            d = path.join(" "),
        )
    }
}

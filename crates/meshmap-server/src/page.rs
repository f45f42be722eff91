use meshmap_common::MapScene;

const SCENE_PLACEHOLDER: &str = "__MESHMAP_SCENE__";
const HOST_PLACEHOLDER: &str = "__MESHMAP_HOST__";

const MAP_HTML: &str = r#"<!doctype html>
<html lang="en">
    <head>
        <meta charset="utf-8" />
        <meta name="viewport" content="width=device-width, initial-scale=1" />
        <title>meshmap · __MESHMAP_HOST__</title>

        <!-- Leaflet 1.9.4 -->
        <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous" />
        <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"></script>

        <!-- Leaflet.markercluster 1.4.1 -->
        <link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.4.1/dist/MarkerCluster.css" />
        <link rel="stylesheet" href="https://unpkg.com/leaflet.markercluster@1.4.1/dist/MarkerCluster.Default.css" />
        <script src="https://unpkg.com/leaflet.markercluster@1.4.1/dist/leaflet.markercluster.js"></script>

        <style>
            html, body { height: 100%; margin: 0; font-family: system-ui, sans-serif; }
            #map { position: absolute; inset: 0; }
            .pin {
                width: 18px;
                height: 18px;
                border-radius: 50%;
                border: 2px solid #ffffff;
                box-shadow: 0 0 6px rgba(0, 0, 0, 0.45);
            }
            .pin-blue { background: #2a81cb; }
            .pin-green { background: #2aad27; }
            .legend {
                position: absolute;
                right: 12px;
                bottom: 24px;
                z-index: 1000;
                padding: 8px 12px;
                background: rgba(255, 255, 255, 0.92);
                border-radius: 6px;
                font-size: 13px;
                line-height: 1.5;
            }
            .swatch { display: inline-block; width: 18px; height: 4px; margin-right: 6px; vertical-align: middle; }
        </style>
    </head>
    <body>
        <div id="map"></div>
        <div class="legend" id="legend"></div>
        <script type="application/json" id="scene">__MESHMAP_SCENE__</script>
        <script>
            const scene = JSON.parse(document.getElementById("scene").textContent);
            const latLng = (c) => [c.latitude, c.longitude];
            const text = (s) => {
                const el = document.createElement("span");
                el.textContent = s;
                return el;
            };
            const pin = (color) => L.divIcon({ className: "pin pin-" + color, iconSize: [18, 18] });

            const map = L.map("map").setView(latLng(scene.center), scene.zoom);
            L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
                maxZoom: 19,
                attribution: "&copy; OpenStreetMap contributors",
            }).addTo(map);

            const gw = scene.gateway_marker;
            L.marker(latLng(gw.position), { icon: pin(gw.color) }).bindPopup(text(gw.label)).addTo(map);

            const cluster = L.markerClusterGroup();
            for (const m of scene.markers) {
                L.marker(latLng(m.position), { icon: pin(m.color) }).bindPopup(text(m.label)).addTo(cluster);
            }
            cluster.addTo(map);

            for (const link of scene.links) {
                L.polyline([latLng(link.from), latLng(link.to)], {
                    color: link.tier,
                    weight: link.weight,
                    opacity: link.opacity,
                }).addTo(map);
            }

            const legend = document.getElementById("legend");
            const line = (content) => {
                const row = document.createElement("div");
                row.append(...content);
                legend.append(row);
            };
            const swatch = (color) => {
                const s = document.createElement("span");
                s.className = "swatch";
                s.style.background = color;
                return s;
            };
            const t = scene.thresholds;
            line([swatch("green"), text("SNR ≥ " + t.upper + " dB")]);
            line([swatch("yellow"), text("between")]);
            line([swatch("red"), text("SNR ≤ " + t.lower + " dB")]);
            line([text(scene.direct_connections + " direct, " + scene.unplaced + " without position")]);
            if (!scene.gateway_located) {
                line([text("gateway position unknown, showing default center")]);
            }
        </script>
    </body>
</html>
"#;

/// Embed `scene` as JSON in the map page. Every `<` in the JSON is escaped so
/// node names cannot close the script element.
pub fn render_map_page(host: &str, scene: &MapScene) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(scene)?.replace('<', "\\u003c");
    Ok(MAP_HTML
        .replace(HOST_PLACEHOLDER, &escape_html(host))
        .replace(SCENE_PLACEHOLDER, &json))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// HTML shell for the chart page. The server renders the static parts; the inline
// script only paints `ViewFrame`s received over /ws/chart and sends slider/checkbox input.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::models::{Metric, NO_RESULTS_MESSAGE};
use crate::route::Route;

const STYLES: &str = r#"
body { font-family: sans-serif; margin: 0; }
.container { max-width: 640px; margin: 0 auto; padding: 1rem; text-align: center; }
.bar-chart { display: flex; align-items: flex-end; justify-content: center; gap: 1rem; height: 300px; }
.bar { width: 80px; color: #fff; display: flex; align-items: flex-end; justify-content: center; }
.seats-available { background: #2e7d32; }
.seats-reserved { background: #1565c0; }
.waitlist { background: #c62828; }
.legend { display: flex; justify-content: center; gap: 1rem; margin: 1rem 0; }
.legend-item { display: flex; align-items: center; gap: .25rem; }
.legend-box { width: 14px; height: 14px; }
.red-text { color: #c62828; }
.slider-container input { width: 100%; }
[hidden] { display: none !important; }
"#;

const PAINTER: &str = r#"
(function () {
  var root = document.getElementById("chart-root");
  var id = root.dataset.identifier;
  var wsPath = root.dataset.explicit === "true" ? "/ws/chart/" + encodeURIComponent(id) : "/ws/chart";
  var scheme = location.protocol === "https:" ? "wss://" : "ws://";
  var ws = new WebSocket(scheme + location.host + wsPath + "?optimized=" + root.dataset.optimized);
  var slider = document.getElementById("slider");
  var optimized = document.getElementById("optimized");
  function show(el, on) { document.getElementById(el).hidden = !on; }
  ws.onmessage = function (ev) {
    var frame = JSON.parse(ev.data);
    show("loading", frame.status === "loading");
    show("no-results", frame.status === "noResults");
    show("chart", frame.status === "ready");
    optimized.checked = frame.optimized;
    if (frame.status !== "ready") { return; }
    frame.bars.forEach(function (bar) {
      var el = document.getElementById("bar-" + bar.cssClass);
      el.style.height = bar.heightPercent + "%";
      el.textContent = bar.value === null ? "" : String(bar.value);
    });
    slider.max = frame.slider.max;
    slider.value = frame.slider.value;
    document.getElementById("as-of").textContent = frame.asOf || "";
  };
  slider.addEventListener("input", function () {
    ws.send(JSON.stringify({ type: "select", index: Number(slider.value) }));
  });
  optimized.addEventListener("change", function () {
    ws.send(JSON.stringify({ type: "optimized", enabled: optimized.checked }));
  });
})();
"#;

/// Renders the page for `route`.
pub fn render(route: &Route, optimized: bool) -> String {
    let from = if route.is_explicit() {
        route.path()
    } else {
        "/".to_string()
    };
    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "UCD CRN Tracker - " (route.identifier()) }
                style { (PreEscaped(STYLES)) }
            }
            body {
                div class="container" id="chart-root"
                    data-identifier=(route.identifier())
                    data-explicit=(if route.is_explicit() { "true" } else { "false" })
                    data-optimized=(if optimized { "1" } else { "0" }) {
                    h1 class="title" { "UCD CRN Tracker" }
                    form class="input-container" action="/submit" method="get" {
                        input type="text" name="crn" placeholder="Enter a valid CRN" autocomplete="off";
                        input type="hidden" name="from" value=(from);
                        button type="submit" { "Enter" }
                    }
                    p id="no-results" class="red-text" hidden { (NO_RESULTS_MESSAGE) }
                    p id="loading" { "Loading data..." }
                    div id="chart" hidden {
                        div class="bar-chart" {
                            @for metric in Metric::ALL { (bar(metric)) }
                        }
                        div class="legend" {
                            @for metric in Metric::ALL { (legend_item(metric)) }
                        }
                        div class="slider-container" {
                            input id="slider" type="range" min="0" max="0" value="0";
                        }
                        p class="updatedAt" { "Displaying seats on " span id="as-of" {} }
                        div class="checkbox-container" {
                            label {
                                "Use optimized? (Experimental) "
                                input type="checkbox" id="optimized" checked[optimized];
                            }
                        }
                    }
                }
                script { (PreEscaped(PAINTER)) }
            }
        }
    };
    markup.into_string()
}

fn bar(metric: Metric) -> Markup {
    html! {
        div class={ "bar " (metric.css_class()) } id={ "bar-" (metric.css_class()) } style="height: 0%" {}
    }
}

fn legend_item(metric: Metric) -> Markup {
    html! {
        div class="legend-item" {
            div class={ "legend-box " (metric.css_class()) } {}
            (metric.label())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_is_escaped() {
        let route = Route::from_path("/<script>\"x\"", "1");
        let html = render(&route, false);
        assert!(html.contains("data-identifier=\"&lt;script&gt;&quot;x&quot;\""));
        assert!(!html.contains("<script>\"x\""));
    }

    #[test]
    fn bare_route_submits_from_root() {
        let html = render(&Route::from_path("", "1"), true);
        assert!(html.contains("data-identifier=\"1\""));
        assert!(html.contains("data-explicit=\"false\""));
        assert!(html.contains("name=\"from\" value=\"/\""));
        assert!(html.contains("id=\"optimized\" checked"));
    }

    #[test]
    fn unchecked_when_not_optimized() {
        let html = render(&Route::from_path("/30127", "1"), false);
        assert!(html.contains("data-explicit=\"true\""));
        assert!(html.contains("name=\"from\" value=\"/30127\""));
        assert!(!html.contains("id=\"optimized\" checked"));
    }

    #[test]
    fn legend_lists_all_metrics() {
        let html = render(&Route::from_path("/30127", "1"), false);
        for m in Metric::ALL {
            assert!(html.contains(m.label()));
            assert!(html.contains(&format!("id=\"bar-{}\"", m.css_class())));
        }
    }
}

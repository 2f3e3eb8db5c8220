//! Bundled demo page.
//!
//! Loaded when no URL is configured. It plays the host application: it
//! defines `window.pagesyncBoot`, shows every port message it receives and
//! inserts the tracked element a little after load so the watcher has
//! something to find.

/// Delay before the demo inserts the tracked element.
pub const DEMO_INSERT_DELAY_MS: u32 = 1500;

const DEMO_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>pagesync demo</title>
<style>
  body { margin: 0; font: 14px/1.4 -apple-system, system-ui, sans-serif; background: #111; color: #ddd; }
  header { position: fixed; top: 0; left: 0; right: 0; padding: 8px 12px; background: #222; z-index: 1; }
  #log { margin-top: 48px; padding: 12px; white-space: pre; font-family: ui-monospace, monospace; font-size: 12px; }
  .intro { height: 100vh; display: flex; align-items: center; justify-content: center; background: #1d2b3a; font-size: 28px; }
  .filler { height: 200vh; background: linear-gradient(#111, #333); }
</style>
</head>
<body>
<header>
  <strong>pagesync demo</strong>
  <button id="top">scroll to top</button>
  <span id="size"></span>
</header>
<div id="log"></div>
<div class="filler"></div>
<script>
(function() {
  var log = document.getElementById("log");
  var size = document.getElementById("size");

  function line(text) {
    var stamp = new Date().toISOString().substring(11, 23);
    log.textContent = stamp + "  " + text + "\n" + log.textContent;
  }

  window.pagesyncBoot = function(flags) {
    line("boot " + JSON.stringify(flags));
    size.textContent = flags.windowSize.width + " x " + flags.windowSize.height;

    setTimeout(function() {
      var intro = document.createElement("div");
      intro.id = flags.introFullVpId;
      intro.className = "intro";
      intro.textContent = "#" + flags.introFullVpId;
      document.body.insertBefore(intro, log.nextSibling);
      line("inserted #" + flags.introFullVpId);
    }, __DELAY_MS__);

    return {
      ports: {
        receiveWindowSize: { send: function(d) {
          size.textContent = d.width + " x " + d.height;
          line("receiveWindowSize " + JSON.stringify(d));
        } },
        notifyScrolling: { send: function() { line("notifyScrolling"); } }
      }
    };
  };

  document.getElementById("top").addEventListener("click", function() {
    window.pagesync.send("performSmoothScrollTo", { x: 0, y: 0 });
  });
})();
</script>
</body>
</html>
"##;

/// HTML of the demo page.
pub fn demo_page() -> String {
    DEMO_TEMPLATE.replace("__DELAY_MS__", &DEMO_INSERT_DELAY_MS.to_string())
}

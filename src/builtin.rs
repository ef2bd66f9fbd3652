pub const BUILTIN_CSS: &str = include_str!("builtin.css");

pub const PAGE_JS: &str = r#"(function () {
  var storageKey = "theme";
  var body = document.body;
  var toggle = document.querySelector(".theme-toggle");

  var prefersDark = false;
  try {
    prefersDark = !!(window.matchMedia && window.matchMedia("(prefers-color-scheme: dark)").matches);
  } catch (_) {
    prefersDark = false;
  }

  var saved = null;
  try {
    saved = localStorage.getItem(storageKey);
  } catch (_) {
    saved = null;
  }

  var dark = saved ? saved === "dark" : prefersDark;
  if (dark) body.classList.add("dark");

  if (toggle) {
    toggle.addEventListener("click", function () {
      body.classList.toggle("dark");
      var next = body.classList.contains("dark") ? "dark" : "light";
      try {
        localStorage.setItem(storageKey, next);
      } catch (_) {}
    });
  }
})();

(function () {
  var input = document.getElementById("search");
  if (!input) return;

  function normalize(text) {
    return String(text || "")
      .toLowerCase()
      .replace(/ё/g, "е")
      .replace(/[\t\n\v\f\r \u00a0\u1680\u2000-\u200a\u2028\u2029\u202f\u205f\u3000\ufeff]+/g, " ")
      .replace(/^ | $/g, "");
  }

  var index = Array.prototype.map.call(document.querySelectorAll(".card"), function (card) {
    var p = card.querySelector(".card-content p");
    var text = (card.getAttribute("data-name") || "") + " " +
      (card.getAttribute("data-tags") || "") + " " +
      (p ? p.textContent : "");
    return { card: card, text: normalize(text) };
  });

  input.addEventListener("input", function (e) {
    var q = normalize(e.target.value);
    index.forEach(function (entry) {
      entry.card.style.display = !q || entry.text.indexOf(q) !== -1 ? "flex" : "none";
    });
  });
})();"#;

//! Chat page served at `/`.
//!
//! A single self-contained document: the script keeps the transcript in the
//! page, posts the whole list to `/api/chat` and appends the reply.

use axum::response::Html;

const CHAT_INDEX_HTML: &str = r#"<!doctype html>
<html lang="sq">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Ndërtimtari Bot</title>
  <style>
    *, *::before, *::after { box-sizing: border-box; }
    body {
      margin: 0; background: #0f0f0f; color: #e0e0e0;
      font-family: system-ui, -apple-system, sans-serif; line-height: 1.4;
    }
    main { max-width: 600px; margin: 0 auto; padding: 2rem 1rem 6rem; }
    h1 { font-size: 1.5rem; margin-bottom: 0.25rem; }
    .hint { font-size: 0.8rem; color: #888; margin-bottom: 1rem; }
    #log { display: flex; flex-direction: column; gap: 1rem; margin-bottom: 2rem; }
    .msg {
      padding: 0.75rem 1rem; border-radius: 12px; max-width: 90%;
      white-space: pre-wrap; color: white;
    }
    .msg.user { align-self: flex-end; background: #0070f3; }
    .msg.assistant { align-self: flex-start; background: #333; }
    form {
      position: fixed; bottom: 0; left: 0; right: 0;
      background: #111; padding: 0.75rem 1rem; display: flex; gap: 0.5rem;
    }
    input {
      flex: 1; padding: 0.75rem 1rem; border-radius: 8px;
      border: 1px solid #555; background: #000; color: white;
    }
    button {
      padding: 0.75rem 1rem; border-radius: 8px; border: none;
      background: #0070f3; color: white; cursor: pointer;
    }
    button:disabled { background: #444; cursor: wait; }
    .disclaimer { margin-top: 3rem; font-size: 0.8rem; color: #888; text-align: center; }
  </style>
</head>
<body>
  <main>
    <h1>Ndërtimtari Bot</h1>
    <p class="hint" id="hint"></p>
    <div id="log"></div>
    <p class="disclaimer">
      Ky mjet jep informacion të përgjithshëm. Për punime strukturore,
      elektrike ose gaz, konsultohu me profesionist të licencuar.
    </p>
  </main>
  <form id="chat">
    <input id="input" autocomplete="off" placeholder="Shkruaj pyetjen këtu…" />
    <button id="send" type="submit">Dërgo</button>
  </form>
  <script>
    const messages = [{
      role: "assistant",
      content: "Përshëndetje! Jam Ndërtimtari Bot. Më pyet çdo gjë rreth materialeve dhe termave të ndërtimit në shqip (p.sh. llak, epoksi, rrjetë, fugë...)."
    }];
    const log = document.getElementById("log");
    const form = document.getElementById("chat");
    const input = document.getElementById("input");
    const send = document.getElementById("send");

    function render(pending) {
      log.replaceChildren();
      for (const m of messages) {
        const div = document.createElement("div");
        div.className = "msg " + m.role;
        div.textContent = m.content;
        log.appendChild(div);
      }
      if (pending) {
        const div = document.createElement("div");
        div.className = "msg assistant";
        div.textContent = "Duke menduar…";
        log.appendChild(div);
      }
    }

    form.addEventListener("submit", async (e) => {
      e.preventDefault();
      const q = input.value.trim();
      if (!q) return;
      input.value = "";
      messages.push({ role: "user", content: q });
      send.disabled = true;
      render(true);
      try {
        const resp = await fetch("/api/chat", {
          method: "POST",
          headers: { "Content-Type": "application/json" },
          body: JSON.stringify({ messages })
        });
        if (!resp.ok) {
          throw new Error("Server error " + resp.status + ": " + await resp.text());
        }
        const data = await resp.json();
        const a = (data && data.message && data.message.content)
          ?? "(nuk mora përgjigje nga serveri — kontrollo konsolën)";
        messages.push({ role: "assistant", content: a });
      } catch (err) {
        console.error("chat error", err);
        messages.push({
          role: "assistant",
          content: "Ndodhi një gabim gjatë pyetjes. Kontrollo lidhjen ose çelësin e OpenAI."
        });
      } finally {
        send.disabled = false;
        render(false);
        input.focus();
      }
    });

    fetch("/api/terms")
      .then((r) => r.ok ? r.json() : [])
      .then((terms) => {
        if (terms.length) {
          document.getElementById("hint").textContent =
            "Terma të njohur: " + terms.map((t) => t.term).join(", ");
        }
      })
      .catch(() => {});

    render(false);
  </script>
</body>
</html>
"#;

/// GET /, the chat page.
pub(super) async fn root() -> Html<&'static str> {
    Html(CHAT_INDEX_HTML)
}

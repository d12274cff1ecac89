use crate::models::StatsSnapshot;

pub fn render_index(stats: &StatsSnapshot) -> String {
    INDEX_HTML
        .replace("{{DAY}}", &stats.current_day.to_string())
        .replace("{{PERCENT}}", &stats.completion_percentage.to_string())
        .replace("{{TOTAL}}", &stats.total_problems.to_string())
        .replace("{{STREAK}}", &stats.current_streak.to_string())
        .replace("{{MAX_STREAK}}", &stats.max_streak.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>100 Days of Problem Solving</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f3f5fb;
      --bg-2: #d9e4ff;
      --ink: #23283b;
      --accent: #4f6df5;
      --accent-2: #7b3fc4;
      --easy: #2d7a4b;
      --medium: #b07d1d;
      --hard: #c63b2b;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 24px 60px rgba(47, 60, 110, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e8ecfd 60%, #f6f4fb 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 26px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: baseline;
      justify-content: space-between;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5d6176;
      font-size: 1rem;
    }

    .tabs {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
      padding: 6px;
      background: rgba(79, 109, 245, 0.1);
      border-radius: 999px;
      width: fit-content;
    }

    .tab {
      background: transparent;
      border: none;
      border-radius: 999px;
      padding: 8px 16px;
      font-size: 0.92rem;
      font-weight: 600;
      color: #646a85;
      cursor: pointer;
    }

    .tab.active {
      background: white;
      color: var(--accent);
      box-shadow: 0 8px 16px rgba(47, 60, 110, 0.12);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 14px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 16px;
      border: 1px solid rgba(47, 60, 110, 0.08);
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8a8ea3;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent);
    }

    .stat .value.alt {
      color: var(--accent-2);
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(47, 60, 110, 0.08);
      display: grid;
      gap: 12px;
    }

    .card-head {
      display: flex;
      flex-wrap: wrap;
      align-items: baseline;
      justify-content: space-between;
      gap: 8px;
    }

    .card-head h3 {
      margin: 0;
      font-size: 1.15rem;
    }

    .muted {
      color: #767b92;
      font-size: 0.88rem;
    }

    .badge {
      display: inline-block;
      border-radius: 999px;
      padding: 2px 10px;
      font-size: 0.76rem;
      font-weight: 600;
      color: white;
    }

    .badge.easy { background: var(--easy); }
    .badge.medium { background: var(--medium); }
    .badge.hard { background: var(--hard); }

    .chip {
      display: inline-block;
      border-radius: 999px;
      padding: 2px 10px;
      font-size: 0.78rem;
      background: rgba(79, 109, 245, 0.12);
      color: var(--accent);
    }

    .problem-line {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 8px;
    }

    .problem-line a {
      color: var(--ink);
      font-weight: 500;
      text-decoration: none;
      border-bottom: 1px dotted rgba(47, 60, 110, 0.4);
    }

    .thumbs {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    .thumbs img {
      width: 88px;
      height: 88px;
      object-fit: cover;
      border-radius: 12px;
      border: 1px solid rgba(47, 60, 110, 0.12);
    }

    form {
      display: grid;
      gap: 12px;
    }

    .row {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(170px, 1fr));
      gap: 10px;
    }

    label.field {
      display: grid;
      gap: 4px;
      font-size: 0.82rem;
      font-weight: 600;
      color: #646a85;
    }

    input, select, textarea {
      border: 1px solid rgba(47, 60, 110, 0.18);
      border-radius: 10px;
      padding: 9px 11px;
      font-size: 0.95rem;
      font-family: inherit;
      background: white;
    }

    textarea {
      min-height: 110px;
      resize: vertical;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 11px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-primary {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(79, 109, 245, 0.3);
    }

    .btn-quiet {
      background: rgba(79, 109, 245, 0.1);
      color: var(--accent);
    }

    .btn-danger {
      background: rgba(198, 59, 43, 0.1);
      color: var(--hard);
    }

    .bar-track {
      background: rgba(47, 60, 110, 0.08);
      border-radius: 999px;
      height: 12px;
      overflow: hidden;
    }

    .bar-fill {
      height: 100%;
      border-radius: 999px;
    }

    .bar-row {
      display: grid;
      grid-template-columns: 76px 1fr 40px;
      align-items: center;
      gap: 10px;
      font-size: 0.9rem;
    }

    .empty {
      text-align: center;
      color: #767b92;
      padding: 28px 12px;
    }

    .status {
      font-size: 0.92rem;
      color: #646a85;
      min-height: 1.2em;
    }

    .status[data-type="error"] { color: var(--hard); }
    .status[data-type="ok"] { color: var(--easy); }

    section[hidden] { display: none; }

    @keyframes rise {
      from { opacity: 0; transform: translateY(18px); }
      to { opacity: 1; transform: translateY(0); }
    }

    @media (max-width: 600px) {
      .app { padding: 26px 20px; }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>100 Days of Problem Solving</h1>
        <p class="subtitle">Day {{DAY}} of 100 &middot; {{PERCENT}}% in &middot; {{TOTAL}} problems &middot; streak {{STREAK}} (best {{MAX_STREAK}})</p>
      </div>
    </header>

    <div class="tabs" role="tablist">
      <button class="tab active" type="button" data-tab="journal">Journal</button>
      <button class="tab" type="button" data-tab="entry-form">New entry</button>
      <button class="tab" type="button" data-tab="stats">Statistics</button>
      <button class="tab" type="button" data-tab="blog">Solutions blog</button>
    </div>

    <section id="journal">
      <div id="headline" class="panel"></div>
      <div id="entries" style="display: grid; gap: 16px; margin-top: 16px;"></div>
    </section>

    <section id="entry-form" hidden>
      <div class="card">
        <div class="card-head">
          <h3 id="entry-form-title">Log a day</h3>
          <span class="muted">One entry per practice day. Problems need a title and a slug.</span>
        </div>
        <form id="add-entry">
          <div class="row">
            <label class="field">Date
              <input type="date" id="entry-date" />
            </label>
            <label class="field">Day number
              <input type="number" id="entry-day" min="1" required />
            </label>
            <label class="field">Pattern of the day
              <input type="text" id="entry-pattern" placeholder="sliding window" required />
            </label>
          </div>
          <div id="problem-rows" style="display: grid; gap: 10px;"></div>
          <div>
            <button class="btn-quiet" type="button" id="add-problem">Add another problem</button>
          </div>
          <label class="field">Tags (comma separated)
            <input type="text" id="entry-tags" placeholder="arrays, revision" />
          </label>
          <label class="field">Notes
            <textarea id="entry-notes" placeholder="What clicked today? What did not?"></textarea>
          </label>
          <label class="field">Screenshots
            <input type="file" id="entry-images" accept="image/*" multiple />
          </label>
          <div class="thumbs" id="image-preview"></div>
          <div style="display: flex; gap: 10px;">
            <button class="btn-primary" type="submit" id="entry-submit">Save entry</button>
            <button class="btn-quiet" type="button" id="entry-cancel" hidden>Cancel edit</button>
          </div>
        </form>
      </div>
    </section>

    <section id="stats" hidden>
      <div id="stats-tiles" class="panel"></div>
      <div class="card" style="margin-top: 16px;">
        <h3 style="margin: 0;">Problems by difficulty</h3>
        <div id="difficulty-bars" style="display: grid; gap: 10px;"></div>
      </div>
      <div class="card" style="margin-top: 16px;">
        <h3 style="margin: 0;">Patterns practiced</h3>
        <div id="pattern-list" style="display: grid; gap: 8px;"></div>
      </div>
    </section>

    <section id="blog" hidden>
      <div class="card">
        <div class="card-head">
          <h3>Write up a solution</h3>
          <span class="muted">Long-form notes live here, next to the daily log.</span>
        </div>
        <form id="add-blog">
          <div class="row">
            <label class="field">Title
              <input type="text" id="blog-title" required />
            </label>
            <label class="field">Author
              <input type="text" id="blog-author" required />
            </label>
          </div>
          <div class="row">
            <label class="field">Difficulty
              <select id="blog-difficulty">
                <option value="">None</option>
                <option value="Easy">Easy</option>
                <option value="Medium">Medium</option>
                <option value="Hard">Hard</option>
              </select>
            </label>
            <label class="field">Problem slug
              <input type="text" id="blog-slug" placeholder="two-sum" />
            </label>
            <label class="field">Tags (comma separated)
              <input type="text" id="blog-tags" />
            </label>
          </div>
          <label class="field">Content
            <textarea id="blog-content" required></textarea>
          </label>
          <div>
            <button class="btn-primary" type="submit">Publish</button>
          </div>
        </form>
      </div>
      <div id="blogs" style="display: grid; gap: 16px; margin-top: 16px;"></div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const tabs = Array.from(document.querySelectorAll('.tab'));
    const sections = ['journal', 'entry-form', 'stats', 'blog'];

    let entries = [];
    let blogs = [];
    let stats = null;
    let problemRows = [];
    let images = [];
    let editingId = null;

    const esc = (value) =>
      String(value == null ? '' : value)
        .replaceAll('&', '&amp;')
        .replaceAll('<', '&lt;')
        .replaceAll('>', '&gt;')
        .replaceAll('"', '&quot;');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const fetchJSON = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const setActiveTab = (tab) => {
      tabs.forEach((button) => button.classList.toggle('active', button.dataset.tab === tab));
      sections.forEach((id) => {
        document.getElementById(id).hidden = id !== tab;
      });
    };

    tabs.forEach((button) => {
      button.addEventListener('click', () => setActiveTab(button.dataset.tab));
    });

    const difficultyBadge = (difficulty) =>
      `<span class="badge ${difficulty.toLowerCase()}">${difficulty}</span>`;

    const renderHeadline = () => {
      if (!stats) return;
      document.getElementById('headline').innerHTML = `
        <div class="stat"><span class="label">Day</span><span class="value">${stats.currentDay}/100</span></div>
        <div class="stat"><span class="label">Problems</span><span class="value alt">${stats.totalProblems}</span></div>
        <div class="stat"><span class="label">Streak</span><span class="value">${stats.currentStreak}d</span></div>
        <div class="stat"><span class="label">Best streak</span><span class="value alt">${stats.maxStreak}d</span></div>
      `;
    };

    const renderEntries = () => {
      const host = document.getElementById('entries');
      if (!entries.length) {
        host.innerHTML = '<div class="card empty">No entries yet. Log day one and the streak starts counting.</div>';
        return;
      }
      host.innerHTML = entries
        .map((entry) => {
          const problems = entry.problems
            .map(
              (problem) => `
                <div class="problem-line">
                  ${difficultyBadge(problem.difficulty)}
                  <a href="${esc(problem.url || '')}" target="_blank" rel="noopener">${esc(problem.title)}</a>
                  ${problem.pattern ? `<span class="chip">${esc(problem.pattern)}</span>` : ''}
                </div>`
            )
            .join('');
          const tags = entry.tags.map((tag) => `<span class="chip">${esc(tag)}</span>`).join(' ');
          const thumbs = (entry.images || [])
            .map((src) => `<img src="${esc(src)}" alt="screenshot" />`)
            .join('');
          return `
            <div class="card">
              <div class="card-head">
                <h3>Day ${entry.day} &middot; ${esc(entry.pattern)}</h3>
                <span class="muted">${esc(entry.date)} &middot; ${entry.problemsSolved} solved</span>
              </div>
              ${problems}
              ${entry.notes ? `<p style="margin: 0;">${esc(entry.notes)}</p>` : ''}
              ${tags ? `<div>${tags}</div>` : ''}
              ${thumbs ? `<div class="thumbs">${thumbs}</div>` : ''}
              <div style="display: flex; gap: 8px;">
                <button class="btn-quiet" type="button" data-edit="${esc(entry.id)}">Edit</button>
                <button class="btn-danger" type="button" data-delete="${esc(entry.id)}">Delete</button>
              </div>
            </div>`;
        })
        .join('');

      host.querySelectorAll('[data-edit]').forEach((button) => {
        button.addEventListener('click', () => startEdit(button.dataset.edit));
      });
      host.querySelectorAll('[data-delete]').forEach((button) => {
        button.addEventListener('click', () => removeEntry(button.dataset.delete));
      });
    };

    const renderStats = () => {
      if (!stats) return;
      renderHeadline();
      document.getElementById('stats-tiles').innerHTML = `
        <div class="stat"><span class="label">Completion</span><span class="value">${stats.completionPercentage}%</span></div>
        <div class="stat"><span class="label">Current day</span><span class="value alt">${stats.currentDay}</span></div>
        <div class="stat"><span class="label">Current streak</span><span class="value">${stats.currentStreak} days</span></div>
        <div class="stat"><span class="label">Best streak</span><span class="value alt">${stats.maxStreak} days</span></div>
        <div class="stat"><span class="label">Total problems</span><span class="value">${stats.totalProblems}</span></div>
      `;

      const counts = stats.problemsByDifficulty;
      const top = Math.max(counts.easy, counts.medium, counts.hard, 1);
      document.getElementById('difficulty-bars').innerHTML = ['easy', 'medium', 'hard']
        .map((level) => {
          const width = Math.round((counts[level] / top) * 100);
          return `
            <div class="bar-row">
              <span style="text-transform: capitalize;">${level}</span>
              <div class="bar-track"><div class="bar-fill" style="width: ${width}%; background: var(--${level});"></div></div>
              <span>${counts[level]}</span>
            </div>`;
        })
        .join('');

      const patterns = Object.entries(stats.patternCounts).sort((a, b) => b[1] - a[1]);
      document.getElementById('pattern-list').innerHTML = patterns.length
        ? patterns
            .map(
              ([pattern, count]) =>
                `<div class="bar-row" style="grid-template-columns: 1fr 90px;"><span>${esc(pattern)}</span><span class="muted">${count} ${count === 1 ? 'entry' : 'entries'}</span></div>`
            )
            .join('')
        : '<div class="empty">No patterns tracked yet</div>';
    };

    const renderBlogs = () => {
      const host = document.getElementById('blogs');
      if (!blogs.length) {
        host.innerHTML = '<div class="card empty">No write-ups yet.</div>';
        return;
      }
      host.innerHTML = blogs
        .map((blog) => {
          const tags = blog.tags.map((tag) => `<span class="chip">${esc(tag)}</span>`).join(' ');
          return `
            <div class="card">
              <div class="card-head">
                <h3>${esc(blog.title)}</h3>
                <span class="muted">${esc(blog.author)} &middot; ${esc(blog.date.slice(0, 10))} &middot; ${blog.readTime} min read</span>
              </div>
              ${blog.difficulty ? difficultyBadge(blog.difficulty) : ''}
              <p style="margin: 0; white-space: pre-wrap;">${esc(blog.content)}</p>
              ${tags ? `<div>${tags}</div>` : ''}
            </div>`;
        })
        .join('');
    };

    const renderProblemRows = () => {
      const host = document.getElementById('problem-rows');
      host.innerHTML = problemRows
        .map(
          (row, index) => `
            <div class="row" data-row="${index}">
              <label class="field">Problem title
                <input type="text" data-field="title" value="${esc(row.title)}" placeholder="Two Sum" />
              </label>
              <label class="field">Slug
                <input type="text" data-field="slug" value="${esc(row.slug)}" placeholder="two-sum" />
              </label>
              <label class="field">Difficulty
                <select data-field="difficulty">
                  ${['Easy', 'Medium', 'Hard']
                    .map((level) => `<option value="${level}" ${row.difficulty === level ? 'selected' : ''}>${level}</option>`)
                    .join('')}
                </select>
              </label>
              <label class="field">Pattern
                <input type="text" data-field="pattern" value="${esc(row.pattern)}" placeholder="hash map" />
              </label>
            </div>`
        )
        .join('');

      host.querySelectorAll('[data-row]').forEach((rowEl) => {
        const index = Number(rowEl.dataset.row);
        rowEl.querySelectorAll('[data-field]').forEach((input) => {
          input.addEventListener('input', () => {
            problemRows[index][input.dataset.field] = input.value;
          });
          input.addEventListener('change', () => {
            problemRows[index][input.dataset.field] = input.value;
          });
        });
      });
    };

    const renderImagePreview = () => {
      document.getElementById('image-preview').innerHTML = images
        .map((src) => `<img src="${esc(src)}" alt="attachment" />`)
        .join('');
    };

    const blankRow = () => ({ id: null, title: '', slug: '', difficulty: 'Easy', pattern: '' });

    const resetEntryForm = () => {
      editingId = null;
      problemRows = [blankRow()];
      images = [];
      document.getElementById('add-entry').reset();
      const days = entries.map((entry) => entry.day);
      document.getElementById('entry-day').value = (days.length ? Math.max(...days) : 0) + 1;
      document.getElementById('entry-form-title').textContent = 'Log a day';
      document.getElementById('entry-submit').textContent = 'Save entry';
      document.getElementById('entry-cancel').hidden = true;
      renderProblemRows();
      renderImagePreview();
    };

    const startEdit = (id) => {
      const entry = entries.find((candidate) => candidate.id === id);
      if (!entry) return;
      editingId = id;
      document.getElementById('entry-date').value = entry.date.slice(0, 10);
      document.getElementById('entry-day').value = entry.day;
      document.getElementById('entry-pattern').value = entry.pattern;
      document.getElementById('entry-tags').value = entry.tags.join(', ');
      document.getElementById('entry-notes').value = entry.notes || '';
      problemRows = entry.problems.map((problem) => ({
        id: problem.id,
        title: problem.title,
        slug: problem.slug,
        difficulty: problem.difficulty,
        pattern: problem.pattern || ''
      }));
      images = (entry.images || []).slice();
      document.getElementById('entry-form-title').textContent = `Edit day ${entry.day}`;
      document.getElementById('entry-submit').textContent = 'Save changes';
      document.getElementById('entry-cancel').hidden = false;
      renderProblemRows();
      renderImagePreview();
      setActiveTab('entry-form');
    };

    const removeEntry = async (id) => {
      try {
        await fetchJSON(`/api/entries/${id}`, { method: 'DELETE' });
        await refresh();
        setStatus('Entry deleted', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    };

    const entryPayload = () => ({
      date: document.getElementById('entry-date').value || null,
      day: Number(document.getElementById('entry-day').value),
      pattern: document.getElementById('entry-pattern').value.trim(),
      problems: problemRows.map((row) => ({
        id: row.id || undefined,
        title: row.title.trim(),
        slug: row.slug.trim(),
        difficulty: row.difficulty,
        pattern: row.pattern.trim() || undefined
      })),
      tags: document.getElementById('entry-tags').value
        .split(',')
        .map((tag) => tag.trim())
        .filter(Boolean),
      notes: document.getElementById('entry-notes').value.trim() || null,
      images: images.length ? images : null
    });

    document.getElementById('add-problem').addEventListener('click', () => {
      problemRows.push(blankRow());
      renderProblemRows();
    });

    document.getElementById('entry-images').addEventListener('change', (event) => {
      const files = Array.from(event.target.files || []);
      files.forEach((file) => {
        const reader = new FileReader();
        reader.onload = () => {
          images.push(reader.result);
          renderImagePreview();
        };
        reader.readAsDataURL(file);
      });
      event.target.value = '';
    });

    document.getElementById('entry-cancel').addEventListener('click', () => {
      resetEntryForm();
      setActiveTab('journal');
    });

    document.getElementById('add-entry').addEventListener('submit', async (event) => {
      event.preventDefault();
      setStatus('Saving...', '');
      try {
        const payload = entryPayload();
        if (editingId) {
          await fetchJSON(`/api/entries/${editingId}`, {
            method: 'PUT',
            headers: { 'content-type': 'application/json' },
            body: JSON.stringify(payload)
          });
        } else {
          await fetchJSON('/api/entries', {
            method: 'POST',
            headers: { 'content-type': 'application/json' },
            body: JSON.stringify(payload)
          });
        }
        await refresh();
        resetEntryForm();
        setActiveTab('journal');
        setStatus('Saved', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    document.getElementById('add-blog').addEventListener('submit', async (event) => {
      event.preventDefault();
      setStatus('Publishing...', '');
      try {
        await fetchJSON('/api/blogs', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({
            title: document.getElementById('blog-title').value.trim(),
            author: document.getElementById('blog-author').value.trim(),
            content: document.getElementById('blog-content').value,
            difficulty: document.getElementById('blog-difficulty').value || null,
            problemSlug: document.getElementById('blog-slug').value.trim() || null,
            tags: document.getElementById('blog-tags').value
              .split(',')
              .map((tag) => tag.trim())
              .filter(Boolean)
          })
        });
        document.getElementById('add-blog').reset();
        await refresh();
        setStatus('Published', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    const refresh = async () => {
      [entries, stats, blogs] = await Promise.all([
        fetchJSON('/api/entries'),
        fetchJSON('/api/stats'),
        fetchJSON('/api/blogs')
      ]);
      renderEntries();
      renderStats();
      renderBlogs();
      if (!editingId) {
        const days = entries.map((entry) => entry.day);
        document.getElementById('entry-day').value = (days.length ? Math.max(...days) : 0) + 1;
      }
    };

    resetEntryForm();
    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

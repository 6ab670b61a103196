//! HTML report generation.
//!
//! Produces one self-contained document: inline CSS, inline JavaScript,
//! the metrics embedded as JSON, and the case table rendered server-side.
//! Chart.js is the only external asset (CDN).

use crate::{
    aggregator::MetricsBundle,
    display::DisplayRow,
    error::ReportResult,
    report::Report,
    status::StatusStyle,
};
use serde::Serialize;

const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.7/dist/chart.umd.min.js";

/// Caller-supplied presentation details. `generated_at` is preformatted so
/// rendering stays free of clock reads.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub title: String,
    pub currency: String,
    pub generated_at: String,
}

/// What the inline script reads. Rows are already in the table markup.
#[derive(Serialize)]
struct EmbeddedData<'a> {
    all: &'a MetricsBundle,
    disputed: &'a MetricsBundle,
    statuses: &'a [StatusStyle],
    currency: &'a str,
}

pub fn render_report(report: &Report, options: &RenderOptions) -> ReportResult<String> {
    let data = EmbeddedData {
        all: &report.all,
        disputed: &report.disputed,
        statuses: &report.statuses,
        currency: &options.currency,
    };
    let data_json = script_safe_json(&serde_json::to_string(&data)?);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<script src="{chart_js}"></script>
<style>{css}</style>
</head>
<body>
<header>
  <div>
    <h1>{title}</h1>
    <div class="meta">Generated {generated_at} &middot; {records} records</div>
  </div>
  <label class="toggle"><input type="checkbox" id="disputedToggle"> Disputed only</label>
</header>
<main>
  <section class="kpis">
    <div class="kpi"><span>Chargebacks</span><strong id="kpiRecords"></strong><em id="kpiAmount"></em></div>
    <div class="kpi"><span>Disputed</span><strong id="kpiDisputed"></strong><em id="kpiDisputedAmount"></em></div>
    <div class="kpi"><span>Won</span><strong id="kpiWon"></strong><em id="kpiRecovered"></em></div>
    <div class="kpi"><span>Lost</span><strong id="kpiLost"></strong><em id="kpiLostAmount"></em></div>
    <div class="kpi"><span>Success rate</span><strong id="kpiSuccess"></strong><em>won / (won + lost)</em></div>
  </section>
  <section class="card wide">
    <div class="card-head">
      <h2>By month</h2>
      <select id="metricSelect"><option value="amount">Amount</option><option value="count">Count</option></select>
      <select id="basisSelect">
        <option value="payment">Payment date</option>
        <option value="chargeback">Chargeback received</option>
        <option value="representative">Submission / payment date</option>
      </select>
    </div>
    <canvas id="monthlyChart" height="110"></canvas>
  </section>
  <section class="card wide"><h2>Monthly success rate</h2><canvas id="successChart" height="70"></canvas></section>
  <section class="grid3">
    <div class="card"><h2>Status</h2><canvas id="statusDonut"></canvas></div>
    <div class="card"><h2>Card type</h2><canvas id="typeDonut"></canvas></div>
    <div class="card"><h2>Country</h2><canvas id="countryDonut"></canvas></div>
  </section>
  <section class="grid2">
    <div class="card"><h2>Top operators</h2><table class="rank" id="rankOperators"></table></div>
    <div class="card"><h2>Top operators (won)</h2><table class="rank" id="rankOperatorsWon"></table></div>
    <div class="card"><h2>Top banks</h2><table class="rank" id="rankBanks"></table></div>
    <div class="card"><h2>Top banks (won)</h2><table class="rank" id="rankBanksWon"></table></div>
  </section>
  <section class="card wide">
    <h2>Cases</h2>
    <div class="filters">
      <input type="search" id="caseSearch" placeholder="Search">
      {operator_filter}
      {type_filter}
      {bank_filter}
      {status_filter}
    </div>
    <table class="cases">
      <thead><tr>
        <th>User</th><th>Amount</th><th>Operator</th><th>Card</th><th>Type</th><th>Bank</th>
        <th>Country</th><th>Payment</th><th>Chargeback</th><th>Disputed</th><th>Status</th>
        <th>Submitted</th><th>Result</th>
      </tr></thead>
      <tbody id="casesBody">
{rows}
      </tbody>
    </table>
    <div class="pager"><button id="prevPage">&lsaquo;</button><span id="pageInfo"></span><button id="nextPage">&rsaquo;</button></div>
  </section>
</main>
<script>
const DATA = {data_json};
{js}
</script>
</body>
</html>
"#,
        title = html_escape(&options.title),
        chart_js = CHART_JS_CDN,
        css = inline_css(),
        generated_at = html_escape(&options.generated_at),
        records = report.all.totals.total_records,
        operator_filter = render_select("operatorFilter", "All operators", &report.filters.operators),
        type_filter = render_select("typeFilter", "All card types", &report.filters.card_types),
        bank_filter = render_select("bankFilter", "All banks", &report.filters.banks),
        status_filter = render_select("statusFilter", "All statuses", &report.filters.statuses),
        rows = report
            .rows
            .iter()
            .map(|r| render_row(r, &options.currency))
            .collect::<Vec<_>>()
            .join("\n"),
        data_json = data_json,
        js = inline_javascript(),
    ))
}

fn render_select(id: &str, all_label: &str, values: &[String]) -> String {
    let options: String = values
        .iter()
        .map(|v| {
            let v = html_escape(v);
            format!(r#"<option value="{v}">{v}</option>"#)
        })
        .collect();
    format!(r#"<select id="{id}"><option value="">{all_label}</option>{options}</select>"#)
}

fn render_row(row: &DisplayRow, currency: &str) -> String {
    let style = row.status.style();
    let disputed = if row.is_disputed {
        r#"<span class="yes">Yes</span>"#
    } else {
        r#"<span class="no">No</span>"#
    };
    format!(
        r#"<tr data-operator="{operator}" data-type="{card_type}" data-bank="{bank}" data-status="{status}" data-disputed="{disputed_flag}">
<td>{user_id}</td><td data-sort="{amount_sort}" class="num">{amount}</td><td>{operator}</td><td class="mono">{card}</td><td>{card_type}</td><td>{bank}</td><td>{country}</td>
<td data-sort="{payment_sort}">{payment}</td><td>{chargeback}</td><td>{disputed}</td>
<td><span class="badge" style="background:{bg};color:{color};border-color:{color}">{status}</span></td>
<td data-sort="{submission_sort}">{submission}</td><td data-sort="{result_sort}">{result}</td></tr>"#,
        operator = html_escape(&row.operator),
        card_type = html_escape(&row.card_type),
        bank = html_escape(&row.bank),
        status = html_escape(style.label),
        disputed_flag = u8::from(row.is_disputed),
        user_id = row.user_id,
        amount_sort = row.amount,
        amount = format_money(row.amount, currency),
        card = html_escape(&row.card_fragment),
        country = html_escape(&row.country),
        payment_sort = row.payment_sort,
        payment = html_escape(&row.payment_date),
        chargeback = html_escape(&row.chargeback_date),
        disputed = disputed,
        bg = style.background,
        color = style.color,
        submission_sort = row.submission_sort,
        submission = html_escape(&row.submission_date),
        result_sort = row.result_sort,
        result = html_escape(&row.result_date),
    )
}

/// `1234567.891` → `MXN 1,234,567.89`
pub fn format_money(amount: f64, currency: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{currency} {sign}{grouped}.{frac_part}")
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// JSON inside a <script> element must not close it.
fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// Inline CSS styles
fn inline_css() -> &'static str {
    r#"
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
body{font-family:system-ui,-apple-system,'Segoe UI',sans-serif;background:#F4F2F7;color:#1e1e2f;font-size:14px}
header{display:flex;justify-content:space-between;align-items:center;padding:1.25rem 2rem;background:#fff;border-bottom:1px solid #e4e0ec}
header h1{font-size:1.4rem;font-weight:700}
header .meta{color:#6b6880;font-size:.85rem;margin-top:.25rem}
.toggle{font-weight:600;cursor:pointer}
main{max-width:1400px;margin:0 auto;padding:1.5rem 2rem;display:flex;flex-direction:column;gap:1.25rem}
.kpis{display:grid;grid-template-columns:repeat(5,1fr);gap:1rem}
.kpi{background:#fff;border-radius:10px;padding:1rem;display:flex;flex-direction:column;gap:.25rem;box-shadow:0 1px 3px rgba(0,0,0,.06)}
.kpi span{color:#6b6880;font-size:.8rem;text-transform:uppercase;letter-spacing:.04em}
.kpi strong{font-size:1.6rem}
.kpi em{font-style:normal;color:#6b6880}
.card{background:#fff;border-radius:10px;padding:1rem 1.25rem;box-shadow:0 1px 3px rgba(0,0,0,.06)}
.card h2{font-size:1rem;margin-bottom:.75rem}
.card-head{display:flex;gap:.75rem;align-items:center}
.card-head h2{margin-bottom:0;margin-right:auto}
.grid3{display:grid;grid-template-columns:repeat(3,1fr);gap:1.25rem}
.grid2{display:grid;grid-template-columns:repeat(2,1fr);gap:1.25rem}
table{width:100%;border-collapse:collapse}
th,td{padding:.45rem .6rem;text-align:left;border-bottom:1px solid #efedf3;white-space:nowrap}
th{font-size:.75rem;text-transform:uppercase;color:#6b6880;cursor:pointer;user-select:none}
.rank td:nth-child(n+3),.num{text-align:right}
.mono{font-family:ui-monospace,monospace}
.badge{padding:3px 8px;border-radius:4px;border:1px solid;font-weight:600;font-size:.8rem}
.yes{color:#4CAF50;font-weight:700}
.no{color:#F44336;font-weight:700}
.filters{display:flex;gap:.5rem;flex-wrap:wrap;margin-bottom:.75rem}
select,input[type=search]{padding:.35rem .5rem;border:1px solid #d9d4e3;border-radius:6px;background:#fff}
.cases{display:block;overflow-x:auto}
.pager{display:flex;justify-content:center;align-items:center;gap:1rem;margin-top:.75rem}
.pager button{border:1px solid #d9d4e3;background:#fff;border-radius:6px;padding:.2rem .7rem;cursor:pointer}
"#
}

/// Inline JavaScript: charts, ranking tables and the case table.
fn inline_javascript() -> &'static str {
    r#"
const charts = {};
const PAGE_SIZE = 50;
const $ = (id) => document.getElementById(id);

function money(v) {
  return DATA.currency + ' ' + v.toLocaleString('en-US', {minimumFractionDigits: 2, maximumFractionDigits: 2});
}

function currentBundle() {
  return $('disputedToggle').checked ? DATA.disputed : DATA.all;
}

function replaceChart(id, config) {
  if (charts[id]) charts[id].destroy();
  charts[id] = new Chart($(id), config);
}

function renderKpis(b) {
  const t = b.totals;
  $('kpiRecords').textContent = t.total_records.toLocaleString('en-US');
  $('kpiAmount').textContent = money(t.total_amount);
  $('kpiDisputed').textContent = t.disputed_count.toLocaleString('en-US');
  $('kpiDisputedAmount').textContent = money(t.disputed_amount);
  $('kpiWon').textContent = t.won_count.toLocaleString('en-US');
  $('kpiRecovered').textContent = money(t.recovered_amount);
  $('kpiLost').textContent = t.lost_count.toLocaleString('en-US');
  $('kpiLostAmount').textContent = money(t.lost_amount);
  $('kpiSuccess').textContent = t.success_rate.toFixed(1) + '%';
}

function renderMonthly(b) {
  const s = b[$('basisSelect').value + '_series'];
  const byStatus = $('metricSelect').value === 'amount' ? s.amount_by_status : s.count_by_status;
  replaceChart('monthlyChart', {
    type: 'bar',
    data: {
      labels: s.months,
      datasets: DATA.statuses.map((st) => ({label: st.label, data: byStatus[st.key], backgroundColor: st.color})),
    },
    options: {responsive: true, scales: {x: {stacked: true}, y: {stacked: true}}},
  });
  replaceChart('successChart', {
    type: 'line',
    data: {labels: s.months, datasets: [{label: 'Success rate %', data: s.success_rate, borderColor: '#4CAF50', tension: 0.3}]},
    options: {responsive: true, scales: {y: {min: 0, max: 100}}},
  });
}

function renderDonut(id, dist) {
  replaceChart(id, {
    type: 'doughnut',
    data: {
      labels: dist.slices.map((s) => s.label),
      datasets: [{data: dist.slices.map((s) => s.value), backgroundColor: dist.slices.map((s) => s.color)}],
    },
    options: {responsive: true, cutout: '62%', plugins: {legend: {position: 'bottom'}}},
  });
}

function renderRanking(id, entries) {
  const table = $(id);
  table.replaceChildren();
  const head = table.insertRow();
  ['#', 'Name', 'Count', 'Amount'].forEach((h) => {
    const th = document.createElement('th');
    th.textContent = h;
    head.appendChild(th);
  });
  entries.forEach((e, i) => {
    const tr = table.insertRow();
    [String(i + 1), e.name, String(e.count), money(e.total_amount)].forEach((v) => {
      tr.insertCell().textContent = v;
    });
  });
}

function renderDashboard() {
  const b = currentBundle();
  renderKpis(b);
  renderMonthly(b);
  renderDonut('statusDonut', b.status_distribution);
  renderDonut('typeDonut', b.type_distribution);
  renderDonut('countryDonut', b.country_distribution);
  renderRanking('rankOperators', b.rankings.operators);
  renderRanking('rankOperatorsWon', b.rankings.operators_won);
  renderRanking('rankBanks', b.rankings.banks);
  renderRanking('rankBanksWon', b.rankings.banks_won);
  page = 0;
  renderTable();
}

const tbody = $('casesBody');
const allRows = Array.from(tbody.rows);
let page = 0;
let sortCol = -1;
let sortAsc = true;

function cellValue(row, col) {
  const cell = row.cells[col];
  if (cell.dataset.sort !== undefined) return parseFloat(cell.dataset.sort);
  const text = cell.textContent.trim();
  const n = Number(text);
  return text !== '' && !Number.isNaN(n) ? n : text.toLowerCase();
}

function visibleRows() {
  const op = $('operatorFilter').value;
  const ty = $('typeFilter').value;
  const bk = $('bankFilter').value;
  const st = $('statusFilter').value;
  const q = $('caseSearch').value.trim().toLowerCase();
  const disputedOnly = $('disputedToggle').checked;
  return allRows.filter((r) =>
    (!op || r.dataset.operator === op) &&
    (!ty || r.dataset.type === ty) &&
    (!bk || r.dataset.bank === bk) &&
    (!st || r.dataset.status === st) &&
    (!disputedOnly || r.dataset.disputed === '1') &&
    (!q || r.textContent.toLowerCase().includes(q)));
}

function renderTable() {
  const rows = visibleRows();
  if (sortCol >= 0) {
    rows.sort((a, b) => {
      const x = cellValue(a, sortCol);
      const y = cellValue(b, sortCol);
      return (x < y ? -1 : x > y ? 1 : 0) * (sortAsc ? 1 : -1);
    });
  }
  const pages = Math.max(1, Math.ceil(rows.length / PAGE_SIZE));
  page = Math.min(page, pages - 1);
  tbody.replaceChildren(...rows.slice(page * PAGE_SIZE, (page + 1) * PAGE_SIZE));
  $('pageInfo').textContent = `Page ${page + 1} of ${pages} (${rows.length} cases)`;
}

document.querySelectorAll('.cases th').forEach((th, col) => {
  th.addEventListener('click', () => {
    sortAsc = sortCol === col ? !sortAsc : true;
    sortCol = col;
    renderTable();
  });
});
['operatorFilter', 'typeFilter', 'bankFilter', 'statusFilter', 'caseSearch'].forEach((id) => {
  $(id).addEventListener('input', () => { page = 0; renderTable(); });
});
$('prevPage').addEventListener('click', () => { page = Math.max(0, page - 1); renderTable(); });
$('nextPage').addEventListener('click', () => { page += 1; renderTable(); });
$('disputedToggle').addEventListener('change', renderDashboard);
$('metricSelect').addEventListener('change', () => renderMonthly(currentBundle()));
$('basisSelect').addEventListener('change', () => renderMonthly(currentBundle()));
renderDashboard();
"#
}

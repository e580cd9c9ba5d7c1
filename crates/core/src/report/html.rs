use crate::domain::catalog::Vendor;
use crate::domain::deal::DealRecord;
use crate::report::{sort_by_discount, DashboardStats};
use anyhow::Context;
use chrono::{DateTime, Utc};

/// Renders the self-contained deal selector page.
///
/// The records are embedded as inline JSON; filtering, selection, post copy and
/// CSV export all run in the browser without further requests.
pub fn render_dashboard(deals: &[DealRecord], generated_at: DateTime<Utc>) -> anyhow::Result<String> {
    let sorted = sort_by_discount(deals);
    let stats = DashboardStats::from_deals(deals);
    let deals_json = script_json(&sorted)?;

    let cards: String = sorted
        .iter()
        .enumerate()
        .map(|(index, deal)| render_card(index, deal))
        .collect();

    let source_options: String = Vendor::all()
        .iter()
        .map(|v| {
            let label = escape_html(v.label());
            format!("            <option value=\"{label}\">{label}</option>\n")
        })
        .collect();

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Golf Deals - Deal Selector</title>
    <style>
{STYLE}
    </style>
</head>
<body>
    <div class="header">
        <h1>⛳ Golf Deals - Deal Selector</h1>
        <div class="timestamp">Last updated: {updated}</div>
    </div>

    <div class="controls">
        <button class="btn btn-primary" onclick="selectAll()">Select All</button>
        <button class="btn btn-secondary" onclick="deselectAll()">Deselect All</button>
        <button class="btn btn-success" onclick="copySelectedDeals()">📋 Copy Selected for Reddit</button>
        <button class="btn btn-secondary" onclick="exportToCSV()">💾 Export to CSV</button>
        <span class="selected"><span id="selectedCount">0</span> deals selected</span>
    </div>

    <div class="stats">
        <div class="stat-card"><h3>Total Deals</h3><div class="value">{total}</div></div>
        <div class="stat-card"><h3>Avg Discount</h3><div class="value">{avg:.1}%</div></div>
        <div class="stat-card"><h3>Best Deal</h3><div class="value">{max:.0}%</div></div>
        <div class="stat-card"><h3>Total Savings</h3><div class="value">${savings:.0}</div></div>
    </div>

    <div class="filters">
        <select id="qualityFilter" onchange="filterDeals()">
            <option value="all">All Quality Levels</option>
            <option value="50">🔥 50%+ off only</option>
            <option value="30">30%+ off only</option>
            <option value="20">20%+ off only</option>
        </select>
        <select id="sourceFilter" onchange="filterDeals()">
            <option value="all">All Sources</option>
{source_options}        </select>
    </div>

    <div id="copyOutput">
        <h3>📋 Reddit Posts (Ready to Copy)</h3>
        <pre id="copyText"></pre>
        <button class="btn btn-primary" onclick="copyToClipboard()">Copy to Clipboard</button>
    </div>

    <div id="dealsContainer">
{cards}    </div>

    <div id="notification" class="notification"></div>

    <script>
        const deals = {deals_json};
{SCRIPT}
    </script>
</body>
</html>
"#,
        updated = generated_at.format("%B %d, %Y at %I:%M %p UTC"),
        total = stats.total_deals,
        avg = stats.avg_discount,
        max = stats.max_discount,
        savings = stats.total_savings,
    ))
}

fn render_card(index: usize, deal: &DealRecord) -> String {
    let quality = deal.quality();
    let source = escape_html(&deal.source);
    format!(
        r#"        <div class="deal-card {class}" data-discount="{pct}" data-source="{source}" data-index="{index}">
            <input type="checkbox" class="deal-checkbox" onchange="updateSelection()">
            <div class="deal-info">
                <h3>{name}</h3>
                <div class="deal-prices">
                    <span class="price-tag original-price">${original:.2}</span>
                    <span class="price-tag sale-price">${sale:.2}</span>
                    <span class="price-tag savings">Save ${savings:.2} ({pct:.0}% off)</span>
                </div>
                <span class="deal-quality quality-{class}">{label}</span>
                <div class="deal-source">Source: {source}</div>
            </div>
            <div class="deal-actions">
                <a href="{url}" target="_blank" rel="noopener" class="btn btn-secondary">View Category</a>
            </div>
        </div>
"#,
        class = quality.css_class(),
        label = quality.label(),
        pct = deal.discount_pct,
        name = escape_html(&deal.product_name),
        original = deal.original_price,
        sale = deal.sale_price,
        savings = deal.savings,
        url = escape_html(&deal.url),
    )
}

pub fn escape_html(s: &str) -> String {
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

// `</` inside an inline script would close the element early.
fn script_json(deals: &[DealRecord]) -> anyhow::Result<String> {
    let json = serde_json::to_string(deals).context("failed to serialize deals for dashboard")?;
    Ok(json.replace("</", "<\\/"))
}

const STYLE: &str = r#"        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f5f5f5; padding: 20px; }
        .header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; border-radius: 10px; margin-bottom: 30px; }
        .header h1 { font-size: 2em; margin-bottom: 10px; }
        .header .timestamp { opacity: 0.9; font-size: 0.9em; }
        .controls, .filters { background: white; padding: 20px; border-radius: 8px; margin-bottom: 20px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .controls { display: flex; gap: 15px; flex-wrap: wrap; align-items: center; }
        .controls .selected { margin-left: auto; font-weight: 600; color: #718096; }
        .btn { padding: 12px 24px; border: none; border-radius: 5px; cursor: pointer; font-weight: 600; font-size: 1em; text-decoration: none; }
        .btn-primary { background: #667eea; color: white; }
        .btn-success { background: #48bb78; color: white; }
        .btn-secondary { background: #718096; color: white; }
        .stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; margin-bottom: 30px; }
        .stat-card { background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .stat-card h3 { color: #666; font-size: 0.9em; margin-bottom: 8px; }
        .stat-card .value { font-size: 2em; font-weight: bold; color: #667eea; }
        .filters select { padding: 10px; border: 2px solid #ddd; border-radius: 5px; font-size: 1em; margin-right: 10px; }
        .deal-card { background: white; padding: 20px; margin-bottom: 15px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); border-left: 4px solid #667eea; display: flex; gap: 20px; align-items: center; }
        .deal-card.selected { background: #f0f4ff; }
        .deal-card.excellent { border-left-color: #f56565; }
        .deal-card.great { border-left-color: #ed8936; }
        .deal-card.good { border-left-color: #48bb78; }
        .deal-checkbox { width: 24px; height: 24px; cursor: pointer; }
        .deal-info { flex: 1; }
        .deal-info h3 { color: #2d3748; margin-bottom: 10px; font-size: 1.2em; }
        .deal-prices { display: flex; gap: 15px; margin-bottom: 10px; flex-wrap: wrap; }
        .price-tag { padding: 5px 10px; border-radius: 5px; font-weight: 600; }
        .original-price { background: #fed7d7; color: #c53030; text-decoration: line-through; }
        .sale-price { background: #c6f6d5; color: #22543d; font-size: 1.2em; }
        .savings { background: #bee3f8; color: #2c5282; }
        .deal-source { font-size: 0.85em; color: #718096; margin-top: 5px; }
        .deal-quality { display: inline-block; padding: 5px 12px; border-radius: 20px; font-size: 0.9em; font-weight: 600; }
        .quality-excellent { background: #fed7d7; color: #c53030; }
        .quality-great { background: #feebc8; color: #c05621; }
        .quality-good { background: #c6f6d5; color: #22543d; }
        .quality-fair { background: #bee3f8; color: #2c5282; }
        .notification { position: fixed; top: 20px; right: 20px; color: white; padding: 15px 20px; border-radius: 8px; display: none; }
        .notification.show { display: block; }
        #copyOutput { display: none; background: #f7fafc; border: 2px solid #e2e8f0; border-radius: 8px; padding: 20px; margin: 20px 0; max-height: 400px; overflow-y: auto; }
        #copyOutput pre { white-space: pre-wrap; font-family: 'Courier New', monospace; font-size: 0.9em; }"#;

const SCRIPT: &str = r#"
        function checkedDeals() {
            return Array.from(document.querySelectorAll('.deal-checkbox'))
                .filter(cb => cb.checked)
                .map(cb => deals[parseInt(cb.closest('.deal-card').dataset.index, 10)]);
        }

        function updateSelection() {
            const boxes = document.querySelectorAll('.deal-checkbox');
            let count = 0;
            boxes.forEach(cb => {
                cb.closest('.deal-card').classList.toggle('selected', cb.checked);
                if (cb.checked) count += 1;
            });
            document.getElementById('selectedCount').textContent = count;
        }

        function selectAll() {
            document.querySelectorAll('.deal-checkbox').forEach(cb => {
                if (cb.closest('.deal-card').style.display !== 'none') cb.checked = true;
            });
            updateSelection();
        }

        function deselectAll() {
            document.querySelectorAll('.deal-checkbox').forEach(cb => { cb.checked = false; });
            updateSelection();
        }

        function filterDeals() {
            const minDiscount = document.getElementById('qualityFilter').value;
            const source = document.getElementById('sourceFilter').value;
            document.querySelectorAll('.deal-card').forEach(card => {
                let show = true;
                if (minDiscount !== 'all' && parseFloat(card.dataset.discount) < parseFloat(minDiscount)) show = false;
                if (source !== 'all' && card.dataset.source !== source) show = false;
                card.style.display = show ? 'flex' : 'none';
            });
        }

        function formatRedditPost(deal) {
            const emoji = deal.discount_pct >= 30 ? '🔥' : '⛳';
            return `**${emoji} [${deal.source}] ${deal.product_name} - $${deal.sale_price.toFixed(2)} (${deal.discount_pct.toFixed(0)}% off!)**

~~$${deal.original_price.toFixed(2)}~~ **$${deal.sale_price.toFixed(2)}** - Save $${deal.savings.toFixed(2)}

[Link to deals page](${deal.url})

Source: ${deal.source}`;
        }

        function copySelectedDeals() {
            const selected = checkedDeals();
            if (selected.length === 0) {
                showNotification('Please select at least one deal!', 'error');
                return;
            }
            document.getElementById('copyText').textContent =
                selected.map(formatRedditPost).join('\n\n---\n\n');
            const panel = document.getElementById('copyOutput');
            panel.style.display = 'block';
            panel.scrollIntoView({ behavior: 'smooth' });
        }

        function copyToClipboard() {
            const text = document.getElementById('copyText').textContent;
            navigator.clipboard.writeText(text).then(() => showNotification('✅ Copied to clipboard!'));
        }

        function csvField(value) {
            return '"' + String(value).replace(/"/g, '""') + '"';
        }

        function exportToCSV() {
            const selected = checkedDeals();
            if (selected.length === 0) {
                showNotification('Please select at least one deal!', 'error');
                return;
            }
            let csv = 'Product,Original Price,Sale Price,Savings,Discount %,Source,URL\n';
            selected.forEach(deal => {
                csv += [
                    csvField(deal.product_name),
                    deal.original_price,
                    deal.sale_price,
                    deal.savings,
                    deal.discount_pct,
                    csvField(deal.source),
                    csvField(deal.url),
                ].join(',') + '\n';
            });
            const blob = new Blob([csv], { type: 'text/csv' });
            const a = document.createElement('a');
            a.href = window.URL.createObjectURL(blob);
            a.download = 'golf-deals-' + new Date().toISOString().split('T')[0] + '.csv';
            a.click();
            showNotification('✅ CSV exported!');
        }

        function showNotification(message, type = 'success') {
            const el = document.getElementById('notification');
            el.textContent = message;
            el.style.background = type === 'error' ? '#f56565' : '#48bb78';
            el.classList.add('show');
            setTimeout(() => el.classList.remove('show'), 3000);
        }"#;

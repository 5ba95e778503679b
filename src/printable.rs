use chrono::NaiveDate;

use crate::build::BuildConfiguration;
use crate::catalog::Category;
use crate::config::StoreConfig;
use crate::pricing::{ItemQuote, PricingPrefs, QuoteSummary};

/// Render a self-contained printable HTML quote.
///
/// Pure string templating: the caller hands the result to whatever surface
/// triggers printing; nothing is written to disk here.
pub fn render_quote_html(
    build: &BuildConfiguration,
    prefs: &PricingPrefs,
    store: &StoreConfig,
    emitted_on: NaiveDate,
) -> String {
    let summary = QuoteSummary::compute(build, prefs);

    let mut table_rows = String::new();
    for category in Category::ALL {
        let Some(part) = build.get(category) else {
            continue;
        };
        let price_cells = if prefs.show_item_prices {
            let item = ItemQuote::compute(category, part, prefs);
            format!(
                "<td class=\"num cash\">{}</td><td class=\"num installment\">{}</td>",
                format_brl(item.cash_price),
                format_brl(item.installment_price),
            )
        } else {
            String::new()
        };
        table_rows.push_str(&format!(
            "<tr><td class=\"category\">{}</td><td>{}</td>{}</tr>\n",
            escape_html(category.label()),
            escape_html(&part.name),
            price_cells,
        ));
    }

    let price_headers = if prefs.show_item_prices {
        "<th class=\"num\">Valor à Vista</th><th class=\"num\">Valor Parcelado</th>"
    } else {
        ""
    };

    let cost_summary = if prefs.show_total_cost {
        format!(
            "<div class=\"line\"><span>Custo das Peças:</span><span>{}</span></div>\n",
            format_brl(summary.total_cost)
        )
    } else {
        String::new()
    };

    let (cash_label, installment_label) = if prefs.show_total_cost {
        (
            format!("Valor à Vista (+{}%)", prefs.cash_markup_pct),
            format!("Valor Parcelado (+{}%)", prefs.installment_markup_pct),
        )
    } else {
        ("Valor à Vista".to_string(), "Valor Parcelado".to_string())
    };

    let branches = escape_html(&store.branches.join(", "));
    let contacts = store
        .contacts
        .iter()
        .map(|c| format!("<p>{}</p>", escape_html(c)))
        .collect::<String>();

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="UTF-8">
<title>Orçamento - {store_name}</title>
<style>
  @page {{ size: A4; margin: 10mm; }}
  body {{ font-family: sans-serif; color: #1f2937; margin: 0 auto; max-width: 640px; padding: 16px; }}
  header {{ border-bottom: 1px solid #d1d5db; padding-bottom: 12px; margin-bottom: 16px; }}
  header h1 {{ margin: 0 0 4px; font-size: 1.4rem; }}
  header p {{ margin: 2px 0; color: #4b5563; font-size: 0.85rem; }}
  h2 {{ text-align: center; color: #0284c7; margin: 8px 0 4px; }}
  .emitted {{ text-align: center; color: #6b7280; margin-bottom: 16px; }}
  table {{ width: 100%; border-collapse: collapse; }}
  th {{ background: #1f2937; color: #fff; text-transform: uppercase; font-size: 0.75rem; padding: 6px 8px; text-align: left; }}
  td {{ border-bottom: 1px solid #e5e7eb; padding: 6px 8px; font-size: 0.85rem; }}
  td.category {{ font-weight: 600; }}
  .num {{ text-align: right; }}
  .cash {{ color: #15803d; }}
  .installment {{ color: #0369a1; }}
  .summary {{ margin-top: 20px; margin-left: auto; max-width: 320px; }}
  .summary h3 {{ border-bottom: 1px solid #d1d5db; padding-bottom: 6px; }}
  .summary .line {{ display: flex; justify-content: space-between; margin: 6px 0; }}
  .summary .total {{ font-weight: 700; font-size: 1.1rem; }}
  .per-installment {{ text-align: right; color: #0284c7; font-weight: 600; }}
  footer {{ margin-top: 32px; text-align: center; color: #6b7280; font-size: 0.8rem; }}
  @media print {{ .no-print {{ display: none; }} }}
</style>
</head>
<body>
<header>
  <h1>{store_name}</h1>
  <p>Unidades: {branches}</p>
  <p>CNPJ: {tax_id}</p>
  {contacts}
</header>
<main>
  <h2>Orçamento de Computador</h2>
  <p class="emitted">Data de Emissão: {emitted_on}</p>
  <table>
    <thead>
      <tr><th>Componente</th><th>Peça Selecionada</th>{price_headers}</tr>
    </thead>
    <tbody>
{table_rows}    </tbody>
  </table>
  <div class="summary">
    <h3>Resumo Financeiro</h3>
    {cost_summary}<div class="line total"><span>{cash_label}:</span><span class="cash">{cash_price}</span></div>
    <div class="line total"><span>{installment_label}:</span><span class="installment">{installment_price}</span></div>
    <p class="per-installment">ou 12x de {per_installment}</p>
  </div>
</main>
<footer>
  <p>Orçamento válido por {validity_days} dias.</p>
  <button class="no-print" onclick="window.print()">Imprimir Orçamento</button>
</footer>
</body>
</html>
"#,
        store_name = escape_html(&store.name),
        tax_id = escape_html(&store.tax_id),
        emitted_on = emitted_on.format("%d/%m/%Y"),
        cash_price = format_brl(summary.cash_price),
        installment_price = format_brl(summary.installment_price),
        per_installment = format_brl(summary.per_installment),
        validity_days = store.quote_validity_days,
    )
}

/// Format a value as pt-BR currency: `R$ 1.234,56`
pub fn format_brl(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.bytes().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit as char);
    }

    format!("{sign}R$ {grouped},{frac:02}")
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

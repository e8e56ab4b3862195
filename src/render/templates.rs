//! Built-in Tera templates.
//!
//! Every name ends in `.html` so Tera autoescapes all interpolated values.

/// Table body rows
pub const CATALOG_ROWS: &str = "catalog_rows.html";
/// Full-width error row
pub const ERROR_ROW: &str = "error_row.html";
/// Category control options
pub const CATEGORY_OPTIONS: &str = "category_options.html";
/// Dashboard alert list
pub const ALERTS: &str = "alerts.html";
/// Standalone catalog page
pub const CATALOG_PAGE: &str = "catalog_page.html";
/// Standalone dashboard page
pub const DASHBOARD_PAGE: &str = "dashboard_page.html";

const CATALOG_ROWS_SRC: &str = r#"{% for row in rows %}<tr data-id="{{ row.id }}">
  <td>{{ row.id }}</td>
  <td>{{ row.name }}</td>
  <td>{{ row.category }}</td>
  <td>{{ row.price }}</td>
  <td>{{ row.quantity }}</td>
  <td>{{ row.unit }}</td>
  <td>{{ row.supplier }}</td>
  <td>{{ row.date_received }}</td>
  <td>{{ row.expiration_date }}</td>
  <td>{{ row.barcode }}</td>
</tr>
{% endfor %}"#;

const ERROR_ROW_SRC: &str = r#"<tr class="catalog-error"><td colspan="{{ colspan }}">{{ message }}</td></tr>
"#;

const CATEGORY_OPTIONS_SRC: &str = r#"<option value="">Todas as categorias</option>
{% for category in categories %}<option value="{{ category }}"{% if category == selected %} selected{% endif %}>{{ category }}</option>
{% endfor %}"#;

const ALERTS_SRC: &str = r#"{% for alert in alerts %}<div class="alert"><b>{{ alert.tipo }}:</b> {{ alert.produto }} — Estoque atual: {{ alert.estoque_atual }}</div>
{% endfor %}"#;

const CATALOG_PAGE_SRC: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="utf-8">
  <title>StockSense - Estoque</title>
</head>
<body>
  <form id="filtrosEstoque">
    <input type="text" id="filtroNome" value="{{ criteria.name_query }}" placeholder="Buscar produto">
    <select id="filtroCategoria">
{{ category_options | safe }}    </select>
    <input type="text" id="filtroFornecedor" value="{{ criteria.supplier }}">
    <select id="filtroQuantidade">
      <option value=""{% if criteria.band == "" %} selected{% endif %}>Todas as quantidades</option>
      <option value="baixo"{% if criteria.band == "baixo" %} selected{% endif %}>Baixo (&lt; 20)</option>
      <option value="medio"{% if criteria.band == "medio" %} selected{% endif %}>Médio (20 - 200)</option>
      <option value="alto"{% if criteria.band == "alto" %} selected{% endif %}>Alto (&gt; 200)</option>
    </select>
    <button type="reset" id="limparFiltros">Limpar filtros</button>
  </form>
  <p class="catalog-summary">
    <span id="contagemFiltrada">{% if filtered_count is number %}{{ filtered_count }}{% endif %}</span> /
    <span id="contagemTotal">{% if total_count is number %}{{ total_count }}{% endif %}</span>
  </p>
  <table id="tabelaEstoque">
    <thead>
      <tr>
        <th>ID</th><th>Produto</th><th>Categoria</th><th>Preço</th><th>Quantidade</th>
        <th>Unidade</th><th>Fornecedor</th><th>Entrada</th><th>Validade</th><th>Código de barras</th>
      </tr>
    </thead>
    <tbody>
{{ table_body | safe }}    </tbody>
  </table>
{% if loaded_at %}  <footer>Atualizado em {{ loaded_at }}</footer>
{% endif %}</body>
</html>
"#;

const DASHBOARD_PAGE_SRC: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="utf-8">
  <title>StockSense - Dashboard</title>
</head>
<body>
  <section class="cards">
    <div class="card"><h3>Produtos em risco</h3><p id="produtosRisco">{{ cards.at_risk }}</p><small id="riscoDesc">{{ cards.at_risk_description }}</small></div>
    <div class="card"><h3>Excesso de estoque</h3><p id="excessoEstoque">{{ cards.excess }}</p><small id="excessoDesc">{{ cards.excess_description }}</small></div>
    <div class="card"><h3>Sugestões de compra</h3><p id="sugestoesCompra">{{ cards.purchase_suggestions }}</p><small id="sugestoesDesc">{{ cards.suggestions_description }}</small></div>
    <div class="card"><h3>Oportunidade</h3><p id="oportunidade">{{ cards.opportunity }}</p></div>
  </section>
  <section class="charts">
    <canvas id="demandChart" data-chart="{{ sales_chart }}"></canvas>
    <canvas id="donutChart" data-chart="{{ status_chart }}"></canvas>
  </section>
  <section id="alertsList">
{{ alerts | safe }}  </section>
</body>
</html>
"#;

/// All built-in templates as `(name, source)` pairs.
pub const ALL: [(&str, &str); 6] = [
    (CATALOG_ROWS, CATALOG_ROWS_SRC),
    (ERROR_ROW, ERROR_ROW_SRC),
    (CATEGORY_OPTIONS, CATEGORY_OPTIONS_SRC),
    (ALERTS, ALERTS_SRC),
    (CATALOG_PAGE, CATALOG_PAGE_SRC),
    (DASHBOARD_PAGE, DASHBOARD_PAGE_SRC),
];

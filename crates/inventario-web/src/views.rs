//! HTML views, rendered with maud.
//!
//! The form and report pages are static shells; `static/app.js` drives them
//! through the JSON API. The table pages are rendered server side.

use axum::{
  extract::{Path, State},
  response::Html,
};
use inventario_core::{
  product::Product,
  record::Record,
  report::{History, HistoryEntry, HistoryKind},
  store::InventoryStore,
  timestamp,
};
use maud::{DOCTYPE, Markup, html};

use crate::{AppState, Error};

// ─── Layout ──────────────────────────────────────────────────────────────────

fn page(title: &str, body: Markup) -> Html<String> {
  let markup = html! {
    (DOCTYPE)
    html lang="es" {
      head {
        meta charset="utf-8";
        meta name="viewport" content="width=device-width, initial-scale=1";
        title { (title) " · Inventario" }
        link rel="stylesheet" href="/static/style.css";
      }
      body {
        nav {
          a href="/" { "Inicio" }
          a href="/registrar/compra" { "Registrar compra" }
          a href="/registrar/venta" { "Registrar venta" }
          a href="/ver/productos" { "Productos" }
          a href="/ver/historial/compras" { "Compras" }
          a href="/ver/historial/ventas" { "Ventas" }
          a href="/ver/top" { "Más vendidos" }
        }
        main {
          h1 { (title) }
          (body)
        }
        script src="/static/app.js" {}
      }
    }
  };
  Html(markup.into_string())
}

/// Render a quantity or price without a trailing `.0` on whole numbers.
fn num(value: f64) -> String {
  if value.fract() == 0.0 && value.abs() < 1e15 {
    format!("{value:.0}")
  } else {
    format!("{value:.2}")
  }
}

// ─── Static pages ────────────────────────────────────────────────────────────

/// `GET /`
pub async fn index() -> Html<String> {
  page(
    "Inventario",
    html! {
      p { "Registre compras y ventas, y consulte el inventario y los reportes." }
      ul class="menu" {
        li { a href="/registrar/compra" { "Registrar compra" } }
        li { a href="/registrar/venta" { "Registrar venta" } }
        li { a href="/ver/productos" { "Ver inventario" } }
        li { a href="/ver/historial/compras" { "Historial de compras" } }
        li { a href="/ver/historial/ventas" { "Historial de ventas" } }
        li { a href="/ver/top" { "Productos más vendidos" } }
      }
    },
  )
}

fn batch_form(kind: &str, endpoint: &str, price_field: &str) -> Markup {
  html! {
    form id="batch-form" data-tipo=(kind) data-endpoint=(endpoint) data-precio=(price_field) {
      div id="items-container" {}
      div class="actions" {
        button type="button" id="add-row" { "Agregar fila" }
        button type="submit" { "Guardar" }
      }
      p id="form-status" {}
    }
  }
}

/// `GET /registrar/compra`
pub async fn purchase_form() -> Html<String> {
  page(
    "Registrar Compra",
    batch_form("compra", "/api/registrar-compra", "precio_compra"),
  )
}

/// `GET /registrar/venta`
pub async fn sale_form() -> Html<String> {
  page(
    "Registrar Venta",
    batch_form("venta", "/api/registrar-venta", "precio_venta"),
  )
}

/// `GET /ver/top`
pub async fn top() -> Html<String> {
  page(
    "Productos Más Vendidos",
    html! {
      form id="top-form" {
        label for="dias" { "Últimos días" }
        input type="number" id="dias" name="dias" min="1" value="30";
        button type="submit" { "Consultar" }
      }
      table id="top-table" {
        thead {
          tr {
            th { "ID" } th { "Producto" } th { "Cantidad" }
            th { "Total vendido" } th { "Ganancia" }
          }
        }
        tbody {}
      }
    },
  )
}

// ─── Table pages ─────────────────────────────────────────────────────────────

fn product_table(products: &[Product]) -> Markup {
  html! {
    table {
      thead {
        tr {
          th { "ID" } th { "Nombre" } th { "Precio compra" } th { "Precio venta" }
          th { "Categoría" } th { "Tipo" } th { "Unidad" } th { "Proveedor" }
          th { "Stock" } th { "Ubicación" }
        }
      }
      tbody {
        @for p in products {
          tr class=[(p.stock < 0.0).then_some("negative")] {
            td { (p.id) } td { (p.nombre) }
            td { (num(p.precio_compra)) } td { (num(p.precio_venta)) }
            td { (p.categoria) } td { (p.tipo) } td { (p.unidad) } td { (p.proveedor) }
            td { (num(p.stock)) } td { (p.ubicacion) }
          }
        }
      }
    }
  }
}

/// `GET /ver/productos`
pub async fn products<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: InventoryStore,
{
  let products = state.store.list_products().await.map_err(Error::store)?;
  Ok(page("Inventario de Productos", product_table(&products)))
}

fn history_rows<R: Record>(rows: &[HistoryEntry<R>]) -> Markup {
  html! {
    @for row in rows {
      tr {
        td { (timestamp::encode(row.record.fecha())) }
        td { (row.record.product_id()) }
        td { (row.nombre) }
        td { (num(row.record.precio())) }
        td { (num(row.record.cantidad())) }
        td { (num(row.record.total())) }
      }
    }
  }
}

fn history_table(history: &History) -> Markup {
  let price_header = match history.kind() {
    HistoryKind::Compras => "Precio compra",
    HistoryKind::Ventas => "Precio venta",
  };
  html! {
    table {
      thead {
        tr {
          th { "Fecha" } th { "ID" } th { "Producto" }
          th { (price_header) } th { "Cantidad" } th { "Total" }
        }
      }
      tbody {
        @match history {
          History::Compras(rows) => { (history_rows(rows)) },
          History::Ventas(rows) => { (history_rows(rows)) },
        }
      }
    }
  }
}

/// `GET /ver/historial/{kind}`
pub async fn history<S>(
  State(state): State<AppState<S>>,
  Path(kind): Path<String>,
) -> Result<Html<String>, Error>
where
  S: InventoryStore,
{
  let kind = HistoryKind::from_segment(&kind);
  let history = state.store.history(kind).await.map_err(Error::store)?;
  Ok(page(kind.title(), history_table(&history)))
}

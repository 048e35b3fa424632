//! Table views over the api, one per collection.
//!
//! Each view fetches its own collection plus every collection it
//! references, and shows foreign keys as labels of the referenced rows.

use std::{collections::HashMap, fmt};

use crate::{
    client::{ApiClient, ClientError},
    models::{Collection, Customer, Employee, Part, PartLineItem, Service, ServiceLineItem, Vehicle, WorkOrder},
};

pub const MISSING_LABEL: &str = "N/A";

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    #[value(name = "clientes")]
    Customers,
    #[value(name = "funcionarios")]
    Employees,
    #[value(name = "veiculos")]
    Vehicles,
    #[value(name = "pecas")]
    Parts,
    #[value(name = "servicos")]
    Services,
    #[value(name = "ordens_de_servico")]
    WorkOrders,
    #[value(name = "itens_peca")]
    PartLineItems,
    #[value(name = "itens_servico")]
    ServiceLineItems,
}

/// id -> label of a fetched collection, built once per fetch.
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    labels: HashMap<i32, String>,
}

impl LabelIndex {
    pub fn new<R: Collection>(records: &[R], label: impl Fn(&R) -> String) -> Self {
        let labels = records
            .iter()
            .map(|record| (record.id(), label(record)))
            .collect();

        Self { labels }
    }

    pub fn label(&self, id: i32) -> &str {
        self.labels.get(&id).map(String::as_str).unwrap_or(MISSING_LABEL)
    }
}

/// One entry of a foreign-key selector.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub id: i32,
    pub label: String,
}

pub fn select_options<R: Collection>(records: &[R], label: impl Fn(&R) -> String) -> Vec<SelectOption> {
    records
        .iter()
        .map(|record| SelectOption { id: record.id(), label: label(record) })
        .collect()
}

pub fn customer_label(customer: &Customer) -> String {
    customer.nome.clone()
}

pub fn employee_label(employee: &Employee) -> String {
    employee.nome.clone()
}

pub fn employee_option(employee: &Employee) -> String {
    format!("{} - {}", employee.nome, text(&employee.cargo))
}

pub fn vehicle_label(vehicle: &Vehicle) -> String {
    format!("{} {} - {}", text(&vehicle.marca), text(&vehicle.modelo), text(&vehicle.placa))
}

pub fn part_label(part: &Part) -> String {
    part.nome.clone()
}

pub fn part_option(part: &Part) -> String {
    format!("{} - {}", part.nome, format_currency(part.preco_unitario))
}

pub fn service_label(service: &Service) -> String {
    service.descricao.clone()
}

pub fn service_option(service: &Service) -> String {
    format!("{} - {}", service.descricao, format_currency(service.preco))
}

pub fn work_order_label(order: &WorkOrder) -> String {
    format!("Order #{}", order.id_ordem)
}

pub fn format_currency(value: f64) -> String {
    format!("R$ {:.2}", value)
}

/// quantity x unit price; a missing operand counts as zero.
pub fn line_total(quantity: Option<i32>, unit_price: Option<f64>) -> f64 {
    f64::from(quantity.unwrap_or(0)) * unit_price.unwrap_or(0.0)
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn display<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

// The form sends "" for an order that is still open.
fn close_date(value: &Option<String>) -> String {
    match value.as_deref() {
        None | Some("") => "-".to_string(),
        Some(date) => date.to_string(),
    }
}

fn price(value: Option<f64>) -> String {
    value.map(format_currency).unwrap_or_else(|| "-".to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub title: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column(&self, header: &str) -> Option<Vec<&str>> {
        let index = self.headers.iter().position(|h| *h == header)?;
        Some(self.rows.iter().map(|row| row[index].as_str()).collect())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        writeln!(f, "{}", self.title)?;
        let headers: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        write_row(f, &headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(f, &rule, &widths)?;

        if self.rows.is_empty() {
            return writeln!(f, "(no records)");
        }
        for row in &self.rows {
            write_row(f, row, &widths)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", line.trim_end())
}

pub fn customers_table(customers: &[Customer]) -> Table {
    Table {
        title: "Customers",
        headers: vec!["ID", "Name", "Phone", "Email", "Address"],
        rows: customers
            .iter()
            .map(|c| vec![
                c.id_cliente.to_string(),
                c.nome.clone(),
                text(&c.telefone),
                text(&c.email),
                text(&c.endereco),
            ])
            .collect(),
    }
}

pub fn employees_table(employees: &[Employee]) -> Table {
    Table {
        title: "Employees",
        headers: vec!["ID", "Name", "Role", "Phone", "Hire date"],
        rows: employees
            .iter()
            .map(|e| vec![
                e.id_funcionario.to_string(),
                e.nome.clone(),
                text(&e.cargo),
                text(&e.telefone),
                text(&e.data_admissao),
            ])
            .collect(),
    }
}

pub fn vehicles_table(vehicles: &[Vehicle], customers: &LabelIndex) -> Table {
    Table {
        title: "Vehicles",
        headers: vec!["ID", "Customer", "Brand", "Model", "Year", "Plate"],
        rows: vehicles
            .iter()
            .map(|v| vec![
                v.id_veiculo.to_string(),
                customers.label(v.id_cliente).to_string(),
                text(&v.marca),
                text(&v.modelo),
                display(&v.ano),
                text(&v.placa),
            ])
            .collect(),
    }
}

pub fn parts_table(parts: &[Part]) -> Table {
    Table {
        title: "Parts",
        headers: vec!["ID", "Name", "Description", "Unit price", "Stock"],
        rows: parts
            .iter()
            .map(|p| vec![
                p.id_peca.to_string(),
                p.nome.clone(),
                text(&p.descricao),
                format_currency(p.preco_unitario),
                p.quantidade_estoque.to_string(),
            ])
            .collect(),
    }
}

pub fn services_table(services: &[Service]) -> Table {
    Table {
        title: "Services",
        headers: vec!["ID", "Description", "Price"],
        rows: services
            .iter()
            .map(|s| vec![s.id_servico.to_string(), s.descricao.clone(), format_currency(s.preco)])
            .collect(),
    }
}

pub fn work_orders_table(orders: &[WorkOrder], vehicles: &LabelIndex, employees: &LabelIndex) -> Table {
    Table {
        title: "Work orders",
        headers: vec!["ID", "Vehicle", "Employee", "Opened", "Closed", "Notes"],
        rows: orders
            .iter()
            .map(|o| vec![
                o.id_ordem.to_string(),
                vehicles.label(o.id_veiculo).to_string(),
                employees.label(o.id_funcionario).to_string(),
                o.data_abertura.clone(),
                close_date(&o.data_conclusao),
                text(&o.observacoes),
            ])
            .collect(),
    }
}

pub fn part_line_items_table(items: &[PartLineItem], orders: &LabelIndex, parts: &LabelIndex) -> Table {
    Table {
        title: "Part line items",
        headers: vec!["ID", "Order", "Part", "Quantity", "Unit price", "Total"],
        rows: items
            .iter()
            .map(|i| vec![
                i.id_item.to_string(),
                orders.label(i.id_ordem).to_string(),
                parts.label(i.id_peca).to_string(),
                i.quantidade.to_string(),
                price(i.preco_unitario),
                format_currency(line_total(Some(i.quantidade), i.preco_unitario)),
            ])
            .collect(),
    }
}

pub fn service_line_items_table(items: &[ServiceLineItem], orders: &LabelIndex, services: &LabelIndex) -> Table {
    Table {
        title: "Service line items",
        headers: vec!["ID", "Order", "Service", "Quantity", "Unit price", "Total"],
        rows: items
            .iter()
            .map(|i| vec![
                i.id_item.to_string(),
                orders.label(i.id_ordem).to_string(),
                services.label(i.id_servico).to_string(),
                display(&i.quantidade),
                price(i.preco_unitario),
                format_currency(line_total(i.quantidade, i.preco_unitario)),
            ])
            .collect(),
    }
}

/// Fetches a collection and everything it references, then renders it.
#[tracing::instrument("Loading view", skip(client))]
pub async fn load_view(client: &ApiClient, kind: CollectionKind) -> Result<Table, ClientError> {
    let table = match kind {
        CollectionKind::Customers => customers_table(&client.list::<Customer>().await?),
        CollectionKind::Employees => employees_table(&client.list::<Employee>().await?),
        CollectionKind::Parts => parts_table(&client.list::<Part>().await?),
        CollectionKind::Services => services_table(&client.list::<Service>().await?),
        CollectionKind::Vehicles => {
            let (vehicles, customers) = tokio::try_join!(
                client.list::<Vehicle>(),
                client.list::<Customer>()
            )?;
            vehicles_table(&vehicles, &LabelIndex::new(&customers, customer_label))
        }
        CollectionKind::WorkOrders => {
            let (orders, vehicles, employees) = tokio::try_join!(
                client.list::<WorkOrder>(),
                client.list::<Vehicle>(),
                client.list::<Employee>()
            )?;
            work_orders_table(
                &orders,
                &LabelIndex::new(&vehicles, vehicle_label),
                &LabelIndex::new(&employees, employee_label),
            )
        }
        CollectionKind::PartLineItems => {
            let (items, orders, parts) = tokio::try_join!(
                client.list::<PartLineItem>(),
                client.list::<WorkOrder>(),
                client.list::<Part>()
            )?;
            part_line_items_table(
                &items,
                &LabelIndex::new(&orders, work_order_label),
                &LabelIndex::new(&parts, part_label),
            )
        }
        CollectionKind::ServiceLineItems => {
            let (items, orders, services) = tokio::try_join!(
                client.list::<ServiceLineItem>(),
                client.list::<WorkOrder>(),
                client.list::<Service>()
            )?;
            service_line_items_table(
                &items,
                &LabelIndex::new(&orders, work_order_label),
                &LabelIndex::new(&services, service_label),
            )
        }
    };

    Ok(table)
}

/// Selector entries for a foreign-key field pointing at `kind`. Line items
/// are never referenced, so they have none.
pub async fn load_options(client: &ApiClient, kind: CollectionKind) -> Result<Vec<SelectOption>, ClientError> {
    let options = match kind {
        CollectionKind::Customers => select_options(&client.list::<Customer>().await?, customer_label),
        CollectionKind::Employees => select_options(&client.list::<Employee>().await?, employee_option),
        CollectionKind::Vehicles => select_options(&client.list::<Vehicle>().await?, vehicle_label),
        CollectionKind::Parts => select_options(&client.list::<Part>().await?, part_option),
        CollectionKind::Services => select_options(&client.list::<Service>().await?, service_option),
        CollectionKind::WorkOrders => select_options(&client.list::<WorkOrder>().await?, work_order_label),
        CollectionKind::PartLineItems | CollectionKind::ServiceLineItems => Vec::new(),
    };

    Ok(options)
}

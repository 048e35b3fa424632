use std::path::PathBuf;

use fake::{faker::{name::en::Name, phone_number::en::PhoneNumber}, Fake};
use once_cell::sync::Lazy;
use reqwest::Response;
use uuid::Uuid;
use workshop::{
    configuration::Settings,
    database::{get_connection_pool, DbPool},
    models::{Collection, Customer, CustomerPayload, Employee, EmployeePayload, Part, PartPayload, Service, ServicePayload, Vehicle, VehiclePayload, WorkOrder, WorkOrderPayload},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

static LOGGER_INSTANCE: Lazy<()> = Lazy::new(|| {
    let log_level = "info".to_string();
    let name = "workshop-test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name, log_level, std::io::stdout);
        init_subscriber(subscriber).expect("Failed to set subscriber");
    } else {
        let subscriber = get_subscriber(name, log_level, std::io::sink);
        init_subscriber(subscriber).expect("Failed to set subscriber");
    }
});

pub struct TestApp{
    pub host: String,
    pub port: u16,
    pub pool: DbPool,
    pub db_path: PathBuf,
    pub api_client: reqwest::Client
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

impl TestApp {
    pub fn get_app_url(&self) -> String{
        format!("http://{}:{}", self.host, self.port)
    }

    pub async fn spawn_app() -> TestApp{
        Lazy::force(&LOGGER_INSTANCE);

        let db_path = std::env::temp_dir().join(format!("workshop-{}.db", Uuid::new_v4()));

        let mut settings = Settings::get().expect("Failed to read configuration");
        settings.application.port = 0;
        settings.database.path = db_path.to_string_lossy().to_string();

        let application = Application::build(settings.clone())
                            .expect("Failed to build application");

        let host = application.host.clone();
        let port = application.port;
        tokio::task::spawn(application.server);

        let pool = get_connection_pool(&settings.database)
            .expect("Failed to build connection pool to test database");

        let api_client = reqwest::Client::builder()
                            .build()
                            .unwrap();

        TestApp{
            host,
            port,
            pool,
            db_path,
            api_client
        }
    }

    pub async fn get_path(&self, path: &str) -> Response{
        self.api_client.get(format!("{}{}", self.get_app_url(), path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> Response{
        self.api_client.post(format!("{}{}", self.get_app_url(), path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_json(&self, path: &str, body: &serde_json::Value) -> Response{
        self.api_client.put(format!("{}{}", self.get_app_url(), path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_path(&self, path: &str) -> Response{
        self.api_client.delete(format!("{}{}", self.get_app_url(), path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// POSTs a payload and returns the created record, asserting a 201.
    pub async fn create<R: Collection>(&self, payload: &R::Payload) -> R{
        let body = serde_json::to_value(payload).unwrap();
        let response = self.post_json(&format!("/{}", R::PATH), &body).await;

        assert_eq!(response.status().as_u16(), 201, "creating {} failed", R::NAME);
        response.json::<R>().await.expect("Failed to parse created record")
    }

    pub async fn list<R: Collection>(&self) -> Vec<R>{
        let response = self.get_path(&format!("/{}", R::PATH)).await;

        assert_eq!(response.status().as_u16(), 200);
        response.json::<Vec<R>>().await.expect("Failed to parse collection")
    }

    pub async fn status_of<R: Collection>(&self, id: i32) -> u16{
        self.get_path(&format!("/{}/{}", R::PATH, id)).await.status().as_u16()
    }

    pub async fn seed_customer(&self) -> Customer{
        self.create::<Customer>(&CustomerPayload{
            nome: Name().fake(),
            telefone: Some(PhoneNumber().fake()),
            email: None,
            endereco: None
        }).await
    }

    pub async fn seed_employee(&self) -> Employee{
        self.create::<Employee>(&EmployeePayload{
            nome: Name().fake(),
            cargo: Some("Mecânico".to_string()),
            telefone: None,
            data_admissao: Some("2023-03-01".to_string())
        }).await
    }

    pub async fn seed_vehicle(&self, customer: &Customer) -> Vehicle{
        self.create::<Vehicle>(&VehiclePayload{
            id_cliente: customer.id_cliente,
            marca: Some("Fiat".to_string()),
            modelo: Some("Uno".to_string()),
            ano: Some(2012),
            placa: Some(unique_plate())
        }).await
    }

    pub async fn seed_work_order(&self) -> WorkOrder{
        let customer = self.seed_customer().await;
        let vehicle = self.seed_vehicle(&customer).await;
        let employee = self.seed_employee().await;

        self.create::<WorkOrder>(&WorkOrderPayload{
            id_veiculo: vehicle.id_veiculo,
            id_funcionario: employee.id_funcionario,
            data_abertura: "2024-06-10".to_string(),
            data_conclusao: None,
            observacoes: Some("Troca de óleo".to_string())
        }).await
    }

    pub async fn seed_part(&self) -> Part{
        self.create::<Part>(&PartPayload{
            nome: "Filtro".to_string(),
            descricao: None,
            preco_unitario: 10.0,
            quantidade_estoque: 5
        }).await
    }

    pub async fn seed_service(&self) -> Service{
        self.create::<Service>(&ServicePayload{
            descricao: "Alinhamento".to_string(),
            preco: 80.0
        }).await
    }
}

pub fn unique_plate() -> String{
    Uuid::new_v4().simple().to_string()[..7].to_uppercase()
}

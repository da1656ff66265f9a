use crate::common::{TestApp, routes};

mod products {
    use super::*;

    #[tokio::test]
    async fn lists_the_full_catalog_without_filters() {
        let app = TestApp::spawn(&[]).await;

        let res = app.get(routes::PRODUCTS).await;

        assert_eq!(res.status, 200);
        let total = res.body["total"].as_u64().unwrap();
        assert!(total > 0);
        assert_eq!(res.body["matched"].as_u64().unwrap(), total);
        assert_eq!(res.body["products"].as_array().unwrap().len(), total as usize);
    }

    #[tokio::test]
    async fn brand_filter_is_exact() {
        let app = TestApp::spawn(&[]).await;

        let res = app.get(&format!("{}?brand=LONGI", routes::PRODUCTS)).await;

        assert_eq!(res.status, 200);
        let products = res.body["products"].as_array().unwrap();
        assert!(!products.is_empty());
        assert!(products.iter().all(|p| p["brand"] == "LONGI"));

        let partial = app.get(&format!("{}?brand=LON", routes::PRODUCTS)).await;
        assert_eq!(partial.body["matched"].as_u64().unwrap(), 0);
    }

    #[tokio::test]
    async fn power_band_filter_uses_range_overlap() {
        let app = TestApp::spawn(&[]).await;

        let res = app.get(&format!("{}?power=over-600", routes::PRODUCTS)).await;

        assert_eq!(res.status, 200);
        let products = res.body["products"].as_array().unwrap();
        assert!(!products.is_empty());
        assert!(
            products
                .iter()
                .all(|p| p["minPower"].as_u64().unwrap() > 600)
        );
    }

    #[tokio::test]
    async fn search_matches_series_case_insensitively() {
        let app = TestApp::spawn(&[]).await;

        let res = app.get(&format!("{}?search=hi-mo", routes::PRODUCTS)).await;

        assert_eq!(res.status, 200);
        let products = res.body["products"].as_array().unwrap();
        assert!(!products.is_empty());
        assert!(
            products
                .iter()
                .all(|p| p["series"].as_str().unwrap().contains("Hi-MO"))
        );
    }

    #[tokio::test]
    async fn unrecognized_power_band_gets_a_json_error() {
        let app = TestApp::spawn(&[]).await;

        let res = app.get(&format!("{}?power=bogus", routes::PRODUCTS)).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"].as_str().unwrap(), "INVALID_REQUEST");
        assert!(res.body["message"].as_str().is_some());
    }

    #[tokio::test]
    async fn fetches_a_single_panel_by_id() {
        let app = TestApp::spawn(&[]).await;

        let res = app.get(&routes::product("tiger-neo-54hl4r-b")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], "tiger-neo-54hl4r-b");
        assert_eq!(res.body["brand"], "JinKO");
        assert!(res.body["datasheet"].as_str().is_some());
    }

    #[tokio::test]
    async fn unknown_panel_id_returns_404() {
        let app = TestApp::spawn(&[]).await;

        let res = app.get(&routes::product("not-a-panel")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"].as_str().unwrap(), "NOT_FOUND");
    }
}

mod datasheets {
    use super::*;

    #[tokio::test]
    async fn returns_structured_tables_for_a_known_pdf() {
        let app = TestApp::spawn(&[]).await;

        let res = app
            .get(&routes::datasheet(
                "JKM430-455N-54HL4R-B-F8-EN_1756905653968.pdf",
            ))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["series"], "Tiger Neo");
        let rows = res.body["specifications"].as_array().unwrap();
        assert_eq!(rows.first().unwrap()["power"].as_u64().unwrap(), 430);
        assert!(res.body["mechanicalSpecs"]["cells"].as_str().is_some());
    }

    #[tokio::test]
    async fn unknown_datasheet_returns_404() {
        let app = TestApp::spawn(&[]).await;

        let res = app.get(&routes::datasheet("missing.pdf")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"].as_str().unwrap(), "NOT_FOUND");
    }
}
